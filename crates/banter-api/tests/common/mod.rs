use async_trait::async_trait;
use axum::{body::Body, http::Request, Router};
use banter_api::{build_router, AppState, Config};
use banter_llm::{Completer, CompletionConfig};
use banter_persist::{
    InMemoryMessageStore, MessageStats, MessageStore, NewMessage, PersistError, StoredMessage,
};
use banter_types::ModelCatalog;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

/// Router over an in-memory store with no completion credential
pub fn test_app() -> Router {
    app_with_store(Arc::new(InMemoryMessageStore::new()))
}

pub fn app_with_store(store: Arc<dyn MessageStore>) -> Router {
    app_with(Config::default(), store)
}

pub fn app_with(config: Config, store: Arc<dyn MessageStore>) -> Router {
    let completer =
        Completer::from_config(CompletionConfig::new(None), ModelCatalog::builtin()).unwrap();
    build_router(Arc::new(AppState::new(config, store, completer)))
}

/// Store whose every operation fails, as if the database were down
pub struct FailingStore;

#[async_trait]
impl MessageStore for FailingStore {
    async fn append(&self, _message: NewMessage) -> banter_persist::Result<StoredMessage> {
        Err(PersistError::Connection("database unavailable".to_string()))
    }

    async fn list_all(&self) -> banter_persist::Result<Vec<StoredMessage>> {
        Err(PersistError::Connection("database unavailable".to_string()))
    }

    async fn clear(&self) -> banter_persist::Result<u64> {
        Err(PersistError::Connection("database unavailable".to_string()))
    }

    async fn count_and_sum_tokens(&self) -> banter_persist::Result<MessageStats> {
        Err(PersistError::Connection("database unavailable".to_string()))
    }

    async fn ping(&self) -> banter_persist::Result<()> {
        Err(PersistError::Connection("database unavailable".to_string()))
    }
}

/// In-memory store whose reads take `delay`
pub struct SlowStore {
    pub inner: InMemoryMessageStore,
    pub delay: Duration,
}

#[async_trait]
impl MessageStore for SlowStore {
    async fn append(&self, message: NewMessage) -> banter_persist::Result<StoredMessage> {
        self.inner.append(message).await
    }

    async fn list_all(&self) -> banter_persist::Result<Vec<StoredMessage>> {
        tokio::time::sleep(self.delay).await;
        self.inner.list_all().await
    }

    async fn clear(&self) -> banter_persist::Result<u64> {
        self.inner.clear().await
    }

    async fn count_and_sum_tokens(&self) -> banter_persist::Result<MessageStats> {
        self.inner.count_and_sum_tokens().await
    }

    async fn ping(&self) -> banter_persist::Result<()> {
        self.inner.ping().await
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> (axum::http::StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn post_empty(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}
