use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// Request logging middleware
///
/// One line per request, with the level following the response class.
pub async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let origin = req
        .headers()
        .get(axum::http::header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let start = Instant::now();

    let response = next.run(req).await;

    let duration_ms = start.elapsed().as_millis() as u64;
    let status = response.status();

    if status.is_server_error() {
        tracing::error!(%method, %path, %status, duration_ms, ?origin, "Request failed");
    } else if status.is_client_error() {
        tracing::warn!(%method, %path, %status, duration_ms, ?origin, "Request rejected");
    } else {
        tracing::info!(%method, %path, %status, duration_ms, "Request processed");
    }

    response
}
