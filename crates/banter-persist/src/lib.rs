pub mod clock;
pub mod error;
pub mod memory;
pub mod models;
pub mod store;

#[cfg(feature = "mongodb")]
pub mod dbs;

pub use clock::MonotonicClock;
pub use error::{PersistError, Result};
pub use memory::InMemoryMessageStore;
pub use models::{MessageStats, NewMessage, StoredMessage};
pub use store::MessageStore;

#[cfg(feature = "mongodb")]
pub use dbs::mongo::MongoMessageStore;
