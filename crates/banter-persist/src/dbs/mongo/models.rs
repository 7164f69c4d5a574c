use banter_types::MessageRole;
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::StoredMessage;

/// MongoDB document shape for a message (uses ObjectId and a BSON date)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoMessage {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(deserialize_with = "deserialize_role")]
    pub role: MessageRole,
    pub text: String,
    #[serde(default)]
    pub tokens: i64,
    #[serde(
        rename = "createdAt",
        with = "bson::serde_helpers::chrono_datetime_as_bson_datetime"
    )]
    pub created_at: DateTime<Utc>,
}

/// Older documents spell the assistant role `ai`
fn deserialize_role<'de, D>(deserializer: D) -> std::result::Result<MessageRole, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    MessageRole::from_stored(&name)
        .ok_or_else(|| serde::de::Error::custom(format!("unknown message role: {name}")))
}

impl From<MongoMessage> for StoredMessage {
    fn from(msg: MongoMessage) -> Self {
        Self {
            id: msg.id.to_hex(),
            role: msg.role,
            text: msg.text,
            tokens: msg.tokens.max(0) as u64,
            created_at: msg.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, Bson};

    #[test]
    fn test_document_shape() {
        let msg = MongoMessage {
            id: ObjectId::new(),
            role: MessageRole::Assistant,
            text: "hi".to_string(),
            tokens: 2,
            created_at: Utc::now(),
        };

        let document = bson::to_document(&msg).unwrap();
        assert_eq!(document.get_str("role").unwrap(), "assistant");
        assert!(matches!(document.get("createdAt"), Some(Bson::DateTime(_))));
        assert!(matches!(document.get("_id"), Some(Bson::ObjectId(_))));
    }

    #[test]
    fn test_reads_legacy_document() {
        let id = ObjectId::new();
        let legacy = doc! {
            "_id": id,
            "role": "ai",
            "text": "old reply",
            "tokens": 3_i32,
            "createdAt": bson::DateTime::now(),
            "__v": 0_i32,
        };

        let msg: MongoMessage = bson::from_document(legacy).unwrap();
        let stored: StoredMessage = msg.into();
        assert_eq!(stored.id, id.to_hex());
        assert_eq!(stored.role, MessageRole::Assistant);
        assert_eq!(stored.tokens, 3);
    }
}
