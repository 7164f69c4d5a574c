use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use banter_types::{ChatMessage, MessageRole, ModelInfo};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::cors::build_cors_layer;
use crate::error::ErrorResponse;
use crate::middleware::{logging, timeout};
use crate::routes::{health, messages, models};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        messages::list_messages,
        messages::send_message,
        messages::clear_messages,
        messages::message_stats,
        models::list_models,
        health::health_check,
    ),
    components(schemas(
        ChatMessage,
        MessageRole,
        ModelInfo,
        ErrorResponse,
        messages::MessagesResponse,
        messages::SendMessageRequest,
        messages::ClearResponse,
        messages::StatsResponse,
        models::ModelsResponse,
        health::HealthResponse,
    )),
    tags(
        (name = "messages", description = "Chat history and message exchange"),
        (name = "models", description = "Selectable completion models"),
        (name = "health", description = "Liveness and dependency status")
    )
)]
pub struct ApiDoc;

pub fn build_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/", get(health::banner))
        .route("/health", get(health::health_check))
        .route(
            "/messages",
            get(messages::list_messages).post(messages::send_message),
        )
        .route("/messages/clear", post(messages::clear_messages))
        .route("/messages/stats", get(messages::message_stats))
        .route("/models", get(models::list_models));

    let cors = build_cors_layer(
        state.config.origin_policy(),
        state.config.cors.allow_credentials,
    );
    let request_timeout = Duration::from_secs(state.config.server.request_timeout_secs);

    api_routes
        .merge(SwaggerUi::new("/api/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn(logging::log_request))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(middleware::from_fn(timeout::envelope_timeout))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_routes() {
        let doc = ApiDoc::openapi();
        for path in ["/messages", "/messages/clear", "/messages/stats", "/models", "/health"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
