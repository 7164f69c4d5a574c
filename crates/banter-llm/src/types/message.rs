use serde::{Deserialize, Serialize};

/// One conversational turn in a completion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    /// System prompt (instructions)
    System { content: String },

    /// User/Human message
    #[serde(rename = "user")]
    Human { content: String },
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self::System {
            content: content.into(),
        }
    }

    pub fn human(content: impl Into<String>) -> Self {
        Self::Human {
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_format() {
        assert_eq!(
            serde_json::to_value(Message::system("be nice")).unwrap(),
            json!({ "role": "system", "content": "be nice" })
        );
        assert_eq!(
            serde_json::to_value(Message::human("hi")).unwrap(),
            json!({ "role": "user", "content": "hi" })
        );
    }
}
