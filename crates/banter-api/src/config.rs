use banter_llm::CompletionConfig;
use banter_types::ModelCatalog;
use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

use crate::cors::OriginPolicy;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub mongodb: MongoDbConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub logging: LoggingConfig,

    // Secrets (from ENV only)
    #[serde(skip)]
    pub mongodb_uri: String,
    #[serde(skip)]
    pub groq_api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
            request_timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Origins allowed verbatim
    pub origins: Vec<String>,
    /// Host suffixes allowed for any origin, e.g. `.vercel.app`
    pub allowed_suffixes: Vec<String>,
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            origins: vec!["http://localhost:5173".to_string()],
            allowed_suffixes: Vec::new(),
            allow_credentials: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MongoDbConfig {
    pub database: String,
    pub collection: String,
}

impl Default for MongoDbConfig {
    fn default() -> Self {
        Self {
            database: "banter".to_string(),
            collection: "messages".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: String,
    /// Falls back to the first catalog entry
    pub default_model: Option<String>,
    pub system_prompt: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        let completion = CompletionConfig::default();
        Self {
            base_url: completion.base_url,
            default_model: None,
            system_prompt: completion.system_prompt,
            max_tokens: completion.max_tokens,
            temperature: completion.temperature,
            timeout_secs: completion.timeout.as_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{ENV}.toml (if ENV is set)
    /// 3. BANTER_<SECTION>__<KEY> environment variables
    /// 4. PORT, GROQ_MODEL and the secrets
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

        let builder = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("BANTER")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.origins")
                    .with_list_parse_key("cors.allowed_suffixes")
                    .try_parsing(true),
            );

        let mut cfg: Config = builder.build()?.try_deserialize()?;
        cfg.apply_env(|key| std::env::var(key).ok())?;
        Ok(cfg)
    }

    /// Apply the well-known variables that live outside the BANTER_ namespace
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        self.mongodb_uri = non_empty("MONGODB_URI")
            .or_else(|| non_empty("MONGO_URI"))
            .ok_or_else(|| {
                ConfigError::Message(
                    "MONGODB_URI (or MONGO_URI) environment variable is required".to_string(),
                )
            })?;
        self.groq_api_key = non_empty("GROQ_API_KEY");

        if let Some(model) = non_empty("GROQ_MODEL") {
            self.llm.default_model = Some(model);
        }
        if let Some(port) = non_empty("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::Message(format!("PORT is not a valid port: {port}")))?;
        }

        Ok(())
    }

    pub fn completion_config(&self) -> CompletionConfig {
        CompletionConfig {
            api_key: self.groq_api_key.clone(),
            base_url: self.llm.base_url.clone(),
            system_prompt: self.llm.system_prompt.clone(),
            max_tokens: self.llm.max_tokens,
            temperature: self.llm.temperature,
            timeout: Duration::from_secs(self.llm.timeout_secs),
        }
    }

    pub fn model_catalog(&self) -> ModelCatalog {
        ModelCatalog::builtin().with_default_model(self.llm.default_model.clone())
    }

    pub fn origin_policy(&self) -> OriginPolicy {
        OriginPolicy::new(self.cors.origins.clone(), self.cors.allowed_suffixes.clone())
    }
}
