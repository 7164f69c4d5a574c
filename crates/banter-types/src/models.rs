use serde::{Deserialize, Serialize};

/// A selectable completion model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
}

impl ModelInfo {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

const BUILTIN_MODELS: [(&str, &str); 4] = [
    ("llama-3.1-8b-instant", "LLaMA 3.1 (8B) instant"),
    ("llama-3.1-70b-instant", "LLaMA 3.1 (70B) instant"),
    ("mixtral-8x7b-32768", "Mixtral 8x7B"),
    ("gemma-7b-it", "Gemma 7B (it)"),
];

/// Fixed model catalog, doubling as the allow-list for requested models.
///
/// Immutable once built; cloned into every component that needs to resolve
/// a caller-supplied model id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCatalog {
    models: Vec<ModelInfo>,
    default_model: String,
}

impl ModelCatalog {
    /// The built-in catalog with its first entry as the default model
    pub fn builtin() -> Self {
        let models: Vec<ModelInfo> = BUILTIN_MODELS
            .iter()
            .map(|(id, name)| ModelInfo::new(*id, *name))
            .collect();
        let default_model = models[0].id.clone();
        Self {
            models,
            default_model,
        }
    }

    /// Override the default model.
    ///
    /// The default is operator-chosen and does not have to be in the catalog.
    /// Blank values are ignored.
    pub fn with_default_model(mut self, model: Option<impl Into<String>>) -> Self {
        if let Some(model) = model {
            let model = model.into();
            let model = model.trim();
            if !model.is_empty() {
                self.default_model = model.to_string();
            }
        }
        self
    }

    pub fn models(&self) -> &[ModelInfo] {
        &self.models
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    pub fn is_allowed(&self, model: &str) -> bool {
        self.models.iter().any(|m| m.id == model)
    }

    /// Requested model if it is in the catalog, otherwise the default
    pub fn resolve<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        match requested {
            Some(model) if self.is_allowed(model) => model,
            _ => &self.default_model,
        }
    }
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_ids() {
        let catalog = ModelCatalog::builtin();
        let ids: Vec<&str> = catalog.models().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "llama-3.1-8b-instant",
                "llama-3.1-70b-instant",
                "mixtral-8x7b-32768",
                "gemma-7b-it",
            ]
        );
        assert_eq!(catalog.default_model(), "llama-3.1-8b-instant");
    }

    #[test]
    fn test_resolve_allowed_model() {
        let catalog = ModelCatalog::builtin();
        assert_eq!(catalog.resolve(Some("gemma-7b-it")), "gemma-7b-it");
    }

    #[test]
    fn test_resolve_unknown_or_missing_model_uses_default() {
        let catalog = ModelCatalog::builtin().with_default_model(Some("mixtral-8x7b-32768"));
        assert_eq!(catalog.resolve(Some("gpt-4")), "mixtral-8x7b-32768");
        assert_eq!(catalog.resolve(Some("")), "mixtral-8x7b-32768");
        assert_eq!(catalog.resolve(None), "mixtral-8x7b-32768");
    }

    #[test]
    fn test_blank_default_is_ignored() {
        let catalog = ModelCatalog::builtin().with_default_model(Some("  "));
        assert_eq!(catalog.default_model(), "llama-3.1-8b-instant");

        let catalog = ModelCatalog::builtin().with_default_model(None::<String>);
        assert_eq!(catalog.default_model(), "llama-3.1-8b-instant");
    }

    #[test]
    fn test_default_outside_catalog_is_not_allowed_for_callers() {
        let catalog = ModelCatalog::builtin().with_default_model(Some("llama-3.3-70b-versatile"));
        assert!(!catalog.is_allowed("llama-3.3-70b-versatile"));
        assert_eq!(catalog.resolve(None), "llama-3.3-70b-versatile");
    }
}
