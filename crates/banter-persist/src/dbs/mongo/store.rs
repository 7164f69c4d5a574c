use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Bson};
use mongodb::{Client, Collection, Database};

use crate::clock::MonotonicClock;
use crate::dbs::mongo::models::MongoMessage;
use crate::error::{PersistError, Result};
use crate::models::{MessageStats, NewMessage, StoredMessage};
use crate::store::MessageStore;

pub struct MongoMessageStore {
    database: Database,
    collection: Collection<MongoMessage>,
    clock: MonotonicClock,
}

impl MongoMessageStore {
    /// Connect to MongoDB and verify the server answers
    pub async fn connect(mongodb_uri: &str, database: &str, collection: &str) -> Result<Self> {
        let client = Client::with_uri_str(mongodb_uri)
            .await
            .map_err(|e| PersistError::Connection(e.to_string()))?;

        let store = Self::new(&client, database, collection);
        store
            .ping()
            .await
            .map_err(|e| PersistError::Connection(e.to_string()))?;

        tracing::info!(database, collection, "MongoDB connected");
        Ok(store)
    }

    pub fn new(client: &Client, database: &str, collection: &str) -> Self {
        let database = client.database(database);
        let collection = database.collection(collection);
        Self {
            database,
            collection,
            clock: MonotonicClock::new(),
        }
    }
}

#[async_trait]
impl MessageStore for MongoMessageStore {
    async fn append(&self, message: NewMessage) -> Result<StoredMessage> {
        message.validate()?;

        let document = MongoMessage {
            id: ObjectId::new(),
            role: message.role,
            text: message.text,
            tokens: i64::try_from(message.tokens)
                .map_err(|_| PersistError::Validation("token count out of range".to_string()))?,
            created_at: message.created_at.unwrap_or_else(|| self.clock.now()),
        };

        self.collection.insert_one(&document).await?;
        Ok(document.into())
    }

    async fn list_all(&self) -> Result<Vec<StoredMessage>> {
        let messages: Vec<MongoMessage> = self
            .collection
            .find(doc! {})
            .sort(doc! { "createdAt": 1, "_id": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(messages.into_iter().map(StoredMessage::from).collect())
    }

    async fn clear(&self) -> Result<u64> {
        let result = self.collection.delete_many(doc! {}).await?;
        Ok(result.deleted_count)
    }

    async fn count_and_sum_tokens(&self) -> Result<MessageStats> {
        let total_messages = self.collection.count_documents(doc! {}).await?;

        let pipeline = vec![doc! {
            "$group": { "_id": null, "totalTokens": { "$sum": "$tokens" } }
        }];
        let mut cursor = self.collection.aggregate(pipeline).await?;

        let total_tokens = match cursor.try_next().await? {
            Some(group) => match group.get("totalTokens") {
                Some(Bson::Int32(n)) => (*n).max(0) as u64,
                Some(Bson::Int64(n)) => (*n).max(0) as u64,
                Some(Bson::Double(n)) => n.max(0.0) as u64,
                _ => 0,
            },
            None => 0,
        };

        Ok(MessageStats {
            total_messages,
            total_tokens,
        })
    }

    async fn ping(&self) -> Result<()> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
