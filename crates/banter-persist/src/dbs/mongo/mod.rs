mod models;
mod store;

pub use models::MongoMessage;
pub use store::MongoMessageStore;
