pub mod api;
pub mod app;
pub mod view;

pub use api::{ApiClient, ClientError, Stats};
pub use app::{Input, Session};
