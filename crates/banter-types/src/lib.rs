pub mod message;
pub mod models;
pub mod tokens;

pub use message::{ChatMessage, MessageRole};
pub use models::{ModelCatalog, ModelInfo};
pub use tokens::{estimate_tokens, is_space, trim_text};
