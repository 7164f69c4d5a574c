use serde_json::Value;
use thiserror::Error;

use crate::reply::{
    AUTH_ERROR_REPLY, MODEL_UNAVAILABLE_REPLY, NETWORK_ERROR_REPLY, SERVICE_ERROR_REPLY,
};

#[derive(Debug, Error)]
pub enum CompletionError {
    /// The service answered with a non-2xx status
    #[error("completion API error ({status})")]
    Status { status: u16, body: Option<Value> },

    /// No HTTP response at all (connect failure, timeout, broken body)
    #[error("completion transport error: {message}")]
    Transport { message: String, timeout: bool },

    #[error("completion client configuration error: {0}")]
    Config(String),
}

impl CompletionError {
    pub fn status(&self) -> Option<u16> {
        match self {
            CompletionError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Provider error code such as `model_decommissioned`, when present
    pub fn error_code(&self) -> Option<&str> {
        match self {
            CompletionError::Status { body: Some(body), .. } => {
                body.pointer("/error/code").and_then(Value::as_str)
            }
            _ => None,
        }
    }

    /// Fixed user-facing reply standing in for the failed completion
    pub fn fallback_reply(&self) -> &'static str {
        if self.error_code() == Some("model_decommissioned") {
            return MODEL_UNAVAILABLE_REPLY;
        }
        match self {
            CompletionError::Status {
                status: 401 | 403, ..
            } => AUTH_ERROR_REPLY,
            CompletionError::Status { .. } | CompletionError::Config(_) => SERVICE_ERROR_REPLY,
            CompletionError::Transport { .. } => NETWORK_ERROR_REPLY,
        }
    }
}

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> Self {
        CompletionError::Transport {
            timeout: err.is_timeout(),
            message: err.to_string(),
        }
    }
}
