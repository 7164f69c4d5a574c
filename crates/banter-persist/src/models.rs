use banter_types::{trim_text, ChatMessage, MessageRole};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A message about to be appended to the store
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub role: MessageRole,
    pub text: String,
    pub tokens: u64,
    /// Assigned by the store when absent
    pub created_at: Option<DateTime<Utc>>,
}

impl NewMessage {
    pub fn new(role: MessageRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            tokens: 0,
            created_at: None,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(MessageRole::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, text)
    }

    pub fn with_tokens(mut self, tokens: u64) -> Self {
        self.tokens = tokens;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Required-field check shared by every backend
    pub fn validate(&self) -> crate::Result<()> {
        if trim_text(&self.text).is_empty() {
            return Err(crate::PersistError::Validation(
                "text must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Database-agnostic stored message; immutable once written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredMessage {
    pub id: String,
    pub role: MessageRole,
    pub text: String,
    pub tokens: u64,
    pub created_at: DateTime<Utc>,
}

impl From<StoredMessage> for ChatMessage {
    fn from(msg: StoredMessage) -> Self {
        Self {
            id: msg.id,
            role: msg.role,
            text: msg.text,
            tokens: msg.tokens,
            created_at: msg.created_at,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageStats {
    pub total_messages: u64,
    pub total_tokens: u64,
}
