pub mod completer;
pub mod config;
pub mod error;
pub mod groq;
pub mod reply;
pub mod traits;
pub mod types;

pub use completer::Completer;
pub use config::CompletionConfig;
pub use error::CompletionError;
pub use groq::GroqClient;
pub use reply::extract_reply;
pub use traits::{ChatClient, ChatOptions, ChatRequest, ChatResponse};
pub use types::Message;
