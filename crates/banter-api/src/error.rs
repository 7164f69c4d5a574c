use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use banter_persist::PersistError;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::service::ServiceError;

/// Body of every failed request
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Storage error: {0}")]
    Storage(#[from] PersistError),

    #[error("Request timed out")]
    Timeout,
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::EmptyMessage => ApiError::BadRequest(err.to_string()),
            ServiceError::Storage(e) => ApiError::Storage(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Timeout => (StatusCode::REQUEST_TIMEOUT, "Request timed out".to_string()),
            ApiError::Storage(ref e) => {
                tracing::error!(error = %e, "storage failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }
        };

        let body = Json(ErrorResponse {
            success: false,
            error: message,
        });

        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
