use async_trait::async_trait;

use crate::error::Result;
use crate::models::{MessageStats, NewMessage, StoredMessage};

/// Durable, append-only collection holding the single global chat history.
///
/// Every call is an independent write or read; nothing spans calls.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Validate, stamp (id and `created_at` when absent) and persist a message
    async fn append(&self, message: NewMessage) -> Result<StoredMessage>;

    /// Every message, ascending by `created_at`, ties in insertion order
    async fn list_all(&self) -> Result<Vec<StoredMessage>>;

    /// Remove all messages. Returns how many were deleted
    async fn clear(&self) -> Result<u64>;

    async fn count_and_sum_tokens(&self) -> Result<MessageStats>;

    /// Cheap reachability probe for health checks
    async fn ping(&self) -> Result<()>;
}
