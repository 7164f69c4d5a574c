use async_trait::async_trait;
use serde_json::Value;

use crate::error::CompletionError;
use crate::reply::extract_reply;
use crate::types::Message;

/// Non-streaming chat completion against some provider
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Resolves to `Err` on transport failures and non-2xx statuses only.
    /// A 2xx with an odd body is still a `ChatResponse`.
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, CompletionError>;
}

#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub options: ChatOptions,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            options: ChatOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ChatOptions) -> Self {
        self.options = options;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChatOptions {
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
}

impl ChatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn temperature(mut self, temp: f64) -> Self {
        self.temperature = Some(temp);
        self
    }

    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.max_tokens = Some(tokens);
        self
    }
}

/// Successful (2xx) completion response.
///
/// The body is kept as loose JSON because providers disagree on its shape;
/// `None` means the service answered with an empty body.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    pub status: u16,
    pub body: Option<Value>,
}

impl ChatResponse {
    pub fn new(status: u16, body: Option<Value>) -> Self {
        Self { status, body }
    }

    pub fn reply_text(&self) -> String {
        extract_reply(self.body.as_ref())
    }
}
