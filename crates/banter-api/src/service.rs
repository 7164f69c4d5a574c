use banter_llm::Completer;
use banter_persist::{MessageStats, MessageStore, NewMessage, PersistError, StoredMessage};
use banter_types::{estimate_tokens, trim_text};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Empty message")]
    EmptyMessage,

    #[error(transparent)]
    Storage(#[from] PersistError),
}

/// Message exchange pipeline over the single global history.
///
/// `send` is four independent steps: store the user message, ask the
/// completer, store the reply, read back the history. Nothing spans them, so
/// a failure after the first write leaves an unanswered user message, and
/// concurrent sends may interleave their writes.
#[derive(Clone)]
pub struct MessageService {
    store: Arc<dyn MessageStore>,
    completer: Completer,
}

impl MessageService {
    pub fn new(store: Arc<dyn MessageStore>, completer: Completer) -> Self {
        Self { store, completer }
    }

    pub fn completer(&self) -> &Completer {
        &self.completer
    }

    pub async fn send(
        &self,
        text: &str,
        model: Option<&str>,
    ) -> Result<Vec<StoredMessage>, ServiceError> {
        let text = trim_text(text);
        if text.is_empty() {
            return Err(ServiceError::EmptyMessage);
        }

        let user = NewMessage::user(text).with_tokens(estimate_tokens(text));
        let user = self.store.append(user).await?;

        let model = self.completer.resolve_model(model);
        let reply_text = self.completer.complete(text, Some(model)).await;

        let reply_tokens = estimate_tokens(&reply_text);
        let reply = NewMessage::assistant(reply_text).with_tokens(reply_tokens);
        let reply = self.store.append(reply).await?;

        tracing::info!(
            model,
            user_message = %user.id,
            reply_message = %reply.id,
            user_tokens = user.tokens,
            reply_tokens = reply.tokens,
            "message exchange stored"
        );

        Ok(self.store.list_all().await?)
    }

    pub async fn history(&self) -> Result<Vec<StoredMessage>, ServiceError> {
        Ok(self.store.list_all().await?)
    }

    pub async fn clear(&self) -> Result<(), ServiceError> {
        let deleted = self.store.clear().await?;
        tracing::info!(deleted, "chat history cleared");
        Ok(())
    }

    pub async fn stats(&self) -> Result<MessageStats, ServiceError> {
        Ok(self.store.count_and_sum_tokens().await?)
    }

    /// Whether the backing store answers
    pub async fn store_reachable(&self) -> bool {
        match self.store.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "store ping failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use banter_llm::reply::echo_reply;
    use banter_llm::CompletionConfig;
    use banter_persist::InMemoryMessageStore;
    use banter_types::{MessageRole, ModelCatalog};

    fn service() -> (MessageService, Arc<InMemoryMessageStore>) {
        let store = Arc::new(InMemoryMessageStore::new());
        let completer =
            Completer::from_config(CompletionConfig::new(None), ModelCatalog::builtin()).unwrap();
        (MessageService::new(store.clone(), completer), store)
    }

    #[tokio::test]
    async fn test_send_stores_user_and_reply() {
        let (service, _) = service();
        let history = service.send("  hello world  ", None).await.unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, MessageRole::User);
        assert_eq!(history[0].text, "hello world");
        assert_eq!(history[0].tokens, 3);

        let expected = echo_reply("hello world");
        assert_eq!(history[1].role, MessageRole::Assistant);
        assert_eq!(history[1].text, expected);
        assert_eq!(history[1].tokens, estimate_tokens(&expected));
    }

    #[tokio::test]
    async fn test_blank_send_writes_nothing() {
        let (service, store) = service();
        let err = service.send(" \t\n", Some("gemma-7b-it")).await.unwrap_err();

        assert!(matches!(err, ServiceError::EmptyMessage));
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_byte_order_mark_only_is_blank() {
        let (service, store) = service();
        let err = service.send("\u{FEFF}", None).await.unwrap_err();

        assert!(matches!(err, ServiceError::EmptyMessage));
        assert!(store.list_all().await.unwrap().is_empty());

        let history = service.send("\u{FEFF}hi\u{FEFF}", None).await.unwrap();
        assert_eq!(history[0].text, "hi");
        assert_eq!(history[0].tokens, 2);
    }

    #[tokio::test]
    async fn test_history_accumulates() {
        let (service, _) = service();
        service.send("first", None).await.unwrap();
        let history = service.send("second", None).await.unwrap();

        assert_eq!(history.len(), 4);
        assert_eq!(history[2].text, "second");
        assert_eq!(history, service.history().await.unwrap());
    }

    #[tokio::test]
    async fn test_clear_and_stats() {
        let (service, _) = service();
        service.send("one two three", None).await.unwrap();

        let stats = service.stats().await.unwrap();
        assert_eq!(stats.total_messages, 2);
        assert_eq!(
            stats.total_tokens,
            4 + estimate_tokens(&echo_reply("one two three"))
        );

        service.clear().await.unwrap();
        assert_eq!(service.stats().await.unwrap(), MessageStats::default());
    }
}
