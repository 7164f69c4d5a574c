use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub services: HashMap<String, String>,
}

pub async fn banner() -> &'static str {
    "AI Chat Backend running"
}

/// Health check endpoint
///
/// Reports store reachability and whether replies come from the completion
/// service or the local fallback.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service status", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let store_up = state.messages.store_reachable().await;

    let mut services = HashMap::new();
    services.insert(
        "store".to_string(),
        if store_up { "connected" } else { "disconnected" }.to_string(),
    );
    services.insert(
        "completion".to_string(),
        if state.messages.completer().is_configured() {
            "configured"
        } else {
            "fallback"
        }
        .to_string(),
    );

    Json(HealthResponse {
        status: if store_up { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        services,
    })
}
