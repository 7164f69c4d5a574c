use banter_types::ModelCatalog;
use std::sync::Arc;

use crate::config::CompletionConfig;
use crate::error::CompletionError;
use crate::groq::GroqClient;
use crate::reply::echo_reply;
use crate::traits::{ChatClient, ChatOptions, ChatRequest};
use crate::types::Message;

/// Turns a user prompt into reply text, whatever happens upstream.
///
/// Without a credential no request is made and the prompt is echoed back.
/// Transport and service failures become fixed fallback replies, so
/// [`Completer::complete`] has no error path.
#[derive(Clone)]
pub struct Completer {
    client: Option<Arc<dyn ChatClient>>,
    catalog: ModelCatalog,
    config: CompletionConfig,
}

impl Completer {
    /// Build from config, creating a [`GroqClient`] only when a credential is set
    pub fn from_config(
        config: CompletionConfig,
        catalog: ModelCatalog,
    ) -> Result<Self, CompletionError> {
        let client: Option<Arc<dyn ChatClient>> = match config.credential() {
            Some(api_key) => {
                let client = GroqClient::with_base_url(api_key, config.base_url.clone(), config.timeout)?;
                Some(Arc::new(client) as Arc<dyn ChatClient>)
            }
            None => None,
        };

        Ok(Self::new(client, catalog, config))
    }

    pub fn new(
        client: Option<Arc<dyn ChatClient>>,
        catalog: ModelCatalog,
        config: CompletionConfig,
    ) -> Self {
        Self {
            client,
            catalog,
            config,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    pub fn resolve_model<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        self.catalog.resolve(requested)
    }

    pub async fn complete(&self, prompt: &str, model: Option<&str>) -> String {
        let Some(client) = &self.client else {
            tracing::debug!("no completion credential configured, echoing prompt");
            return echo_reply(prompt);
        };

        let model = self.resolve_model(model);
        let request = ChatRequest::new(
            model,
            vec![
                Message::system(self.config.system_prompt.as_str()),
                Message::human(prompt),
            ],
        )
        .with_options(
            ChatOptions::new()
                .max_tokens(self.config.max_tokens)
                .temperature(self.config.temperature),
        );

        match client.chat(request).await {
            Ok(response) => {
                tracing::debug!(model, status = response.status, "completion received");
                response.reply_text()
            }
            Err(err @ CompletionError::Status { .. }) => {
                tracing::error!(
                    model,
                    status = err.status(),
                    code = err.error_code(),
                    body = ?err_body(&err),
                    "completion API call failed"
                );
                err.fallback_reply().to_string()
            }
            Err(err) => {
                tracing::error!(model, error = %err, "completion API call failed");
                err.fallback_reply().to_string()
            }
        }
    }
}

fn err_body(err: &CompletionError) -> Option<String> {
    match err {
        CompletionError::Status { body: Some(body), .. } => Some(body.to_string()),
        _ => None,
    }
}
