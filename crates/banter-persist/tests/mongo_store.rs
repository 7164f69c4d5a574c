//! Round trip against a live MongoDB.
//!
//! Run with `MONGODB_URI=mongodb://localhost:27017 cargo test -p banter-persist --features mongodb -- --ignored`

#![cfg(feature = "mongodb")]

use banter_persist::{MessageStore, MongoMessageStore, NewMessage};
use banter_types::MessageRole;

#[tokio::test]
#[ignore = "requires a running MongoDB (MONGODB_URI)"]
async fn test_mongo_round_trip() {
    let uri = std::env::var("MONGODB_URI").expect("MONGODB_URI must be set");
    let collection = format!("messages_test_{}", uuid::Uuid::new_v4().simple());
    let store = MongoMessageStore::connect(&uri, "banter_test", &collection)
        .await
        .unwrap();

    store.clear().await.unwrap();

    let user = store
        .append(NewMessage::user("ping").with_tokens(2))
        .await
        .unwrap();
    let reply = store
        .append(NewMessage::assistant("pong pong").with_tokens(3))
        .await
        .unwrap();
    assert!(reply.created_at > user.created_at);

    let history = store.list_all().await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].role, MessageRole::User);
    assert_eq!(history[1].role, MessageRole::Assistant);
    assert_eq!(history[0], user);

    let stats = store.count_and_sum_tokens().await.unwrap();
    assert_eq!(stats.total_messages, 2);
    assert_eq!(stats.total_tokens, 5);

    assert_eq!(store.clear().await.unwrap(), 2);
    let stats = store.count_and_sum_tokens().await.unwrap();
    assert_eq!(stats.total_messages, 0);
    assert_eq!(stats.total_tokens, 0);
}
