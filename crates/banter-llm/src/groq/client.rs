// Groq client over its OpenAI-compatible chat completions endpoint

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use std::time::Duration;

use crate::config::GROQ_API_BASE;
use crate::error::CompletionError;
use crate::traits::{ChatClient, ChatOptions, ChatRequest, ChatResponse};
use crate::types::Message;

/// HTTP client for `POST {base_url}/chat/completions` (no SDK)
pub struct GroqClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl GroqClient {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self, CompletionError> {
        Self::with_base_url(api_key, GROQ_API_BASE, timeout)
    }

    /// Point the client at any OpenAI-compatible base URL
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CompletionError> {
        let api_key = api_key.into();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key))
                .map_err(|_| CompletionError::Config("Invalid API key format".to_string()))?,
        );

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| CompletionError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Build chat completion request payload
    fn build_chat_request(&self, model: &str, messages: &[Message], options: &ChatOptions) -> Value {
        let mut request = serde_json::json!({
            "model": model,
            "messages": messages,
        });

        if let Some(obj) = request.as_object_mut() {
            if let Some(max_tokens) = options.max_tokens {
                obj.insert("max_tokens".to_string(), serde_json::json!(max_tokens));
            }
            if let Some(temp) = options.temperature {
                obj.insert("temperature".to_string(), serde_json::json!(temp));
            }
        }

        request
    }
}

#[async_trait]
impl ChatClient for GroqClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, CompletionError> {
        let payload = self.build_chat_request(&request.model, &request.messages, &request.options);

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        let body = parse_body(text);

        if !status.is_success() {
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(ChatResponse::new(status.as_u16(), body))
    }
}

/// Loose body parsing: empty means no body, non-JSON stays a string
fn parse_body(text: String) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(&text) {
        Ok(Value::Null) => None,
        Ok(value) => Some(value),
        Err(_) => Some(Value::String(text)),
    }
}
