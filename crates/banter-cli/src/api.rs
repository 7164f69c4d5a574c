use banter_types::{ChatMessage, ModelInfo};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

/// Long enough to cover the server's own completion timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_messages: u64,
    pub total_tokens: u64,
}

#[derive(Deserialize)]
struct MessagesPayload {
    messages: Vec<ChatMessage>,
}

#[derive(Deserialize)]
struct ModelsPayload {
    models: Vec<ModelInfo>,
}

/// Thin client for the banter HTTP API
#[derive(Clone)]
pub struct ApiClient {
    http_client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http_client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn messages(&self) -> Result<Vec<ChatMessage>> {
        let payload: MessagesPayload = self.call(self.get("/messages")).await?;
        Ok(payload.messages)
    }

    /// Send one message and get back the full updated history
    pub async fn send(&self, text: &str, model: Option<&str>) -> Result<Vec<ChatMessage>> {
        let body = json!({ "text": text, "model": model });
        let payload: MessagesPayload = self.call(self.post("/messages").json(&body)).await?;
        Ok(payload.messages)
    }

    pub async fn clear(&self) -> Result<()> {
        let _: Value = self.call(self.post("/messages/clear")).await?;
        Ok(())
    }

    pub async fn stats(&self) -> Result<Stats> {
        self.call(self.get("/messages/stats")).await
    }

    pub async fn models(&self) -> Result<Vec<ModelInfo>> {
        let payload: ModelsPayload = self.call(self.get("/models")).await?;
        Ok(payload.models)
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.http_client.get(format!("{}{}", self.base_url, path))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.http_client.post(format!("{}{}", self.base_url, path))
    }

    /// Execute a request and unwrap the `{success, ...}` envelope
    async fn call<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        let body: Value = serde_json::from_str(&text).unwrap_or(Value::Null);

        let success = body.get("success").and_then(Value::as_bool).unwrap_or(false);
        if !status.is_success() || !success {
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());

            tracing::debug!(status = status.as_u16(), %message, "api call failed");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_value(body)?)
    }
}
