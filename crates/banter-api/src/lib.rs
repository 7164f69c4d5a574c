pub mod app;
pub mod config;
pub mod cors;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod service;
pub mod state;

pub use app::build_router;
pub use config::Config;
pub use service::{MessageService, ServiceError};
pub use state::AppState;
