use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::clock::MonotonicClock;
use crate::error::Result;
use crate::models::{MessageStats, NewMessage, StoredMessage};
use crate::store::MessageStore;

/// Process-local store, insertion ordered
#[derive(Debug, Default)]
pub struct InMemoryMessageStore {
    messages: RwLock<Vec<StoredMessage>>,
    clock: MonotonicClock,
}

impl InMemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn append(&self, message: NewMessage) -> Result<StoredMessage> {
        message.validate()?;

        let stored = StoredMessage {
            id: uuid::Uuid::new_v4().to_string(),
            role: message.role,
            text: message.text,
            tokens: message.tokens,
            created_at: message.created_at.unwrap_or_else(|| self.clock.now()),
        };

        self.messages.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn list_all(&self) -> Result<Vec<StoredMessage>> {
        let mut messages = self.messages.read().await.clone();
        // stable sort keeps insertion order for equal timestamps
        messages.sort_by_key(|m| m.created_at);
        Ok(messages)
    }

    async fn clear(&self) -> Result<u64> {
        let mut messages = self.messages.write().await;
        let deleted = messages.len() as u64;
        messages.clear();
        Ok(deleted)
    }

    async fn count_and_sum_tokens(&self) -> Result<MessageStats> {
        let messages = self.messages.read().await;
        Ok(MessageStats {
            total_messages: messages.len() as u64,
            total_tokens: messages.iter().map(|m| m.tokens).sum(),
        })
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PersistError;
    use banter_types::MessageRole;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_append_assigns_id_and_timestamp() {
        let store = InMemoryMessageStore::new();
        let stored = store
            .append(NewMessage::user("hello").with_tokens(2))
            .await
            .unwrap();

        assert!(!stored.id.is_empty());
        assert_eq!(stored.role, MessageRole::User);
        assert_eq!(stored.text, "hello");
        assert_eq!(stored.tokens, 2);
    }

    #[tokio::test]
    async fn test_append_rejects_blank_text() {
        let store = InMemoryMessageStore::new();
        let err = store.append(NewMessage::user("  \n ")).await.unwrap_err();
        assert!(matches!(err, PersistError::Validation(_)));
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_all_sorted_by_created_at() {
        let store = InMemoryMessageStore::new();
        let now = Utc::now();
        store
            .append(NewMessage::user("later").with_created_at(now))
            .await
            .unwrap();
        store
            .append(NewMessage::assistant("earlier").with_created_at(now - Duration::seconds(5)))
            .await
            .unwrap();

        let texts: Vec<String> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.text)
            .collect();
        assert_eq!(texts, vec!["earlier", "later"]);
    }

    #[tokio::test]
    async fn test_ties_keep_insertion_order() {
        let store = InMemoryMessageStore::new();
        let at = Utc::now();
        for text in ["a", "b", "c"] {
            store
                .append(NewMessage::user(text).with_created_at(at))
                .await
                .unwrap();
        }

        let texts: Vec<String> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.text)
            .collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_generated_timestamps_strictly_increase() {
        let store = InMemoryMessageStore::new();
        let first = store.append(NewMessage::user("q")).await.unwrap();
        let second = store.append(NewMessage::assistant("a")).await.unwrap();
        assert!(second.created_at > first.created_at);
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let store = InMemoryMessageStore::new();
        store.append(NewMessage::user("one")).await.unwrap();
        store.append(NewMessage::user("two")).await.unwrap();

        assert_eq!(store.clear().await.unwrap(), 2);
        assert_eq!(store.clear().await.unwrap(), 0);
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_stats() {
        let store = InMemoryMessageStore::new();
        assert_eq!(
            store.count_and_sum_tokens().await.unwrap(),
            MessageStats::default()
        );

        store.append(NewMessage::user("a b c").with_tokens(4)).await.unwrap();
        store.append(NewMessage::assistant("d").with_tokens(2)).await.unwrap();

        let stats = store.count_and_sum_tokens().await.unwrap();
        assert_eq!(stats.total_messages, 2);
        assert_eq!(stats.total_tokens, 6);
    }
}
