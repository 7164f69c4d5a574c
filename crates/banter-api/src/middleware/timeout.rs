use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;

/// Give the bare 408 produced by the request timeout layer the usual
/// `{success:false, error}` body. Must sit outside the timeout layer.
pub async fn envelope_timeout(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;
    if response.status() != StatusCode::REQUEST_TIMEOUT {
        return response;
    }

    tracing::warn!(%method, %path, "request timed out");
    ApiError::Timeout.into_response()
}
