use axum::{extract::State, Json};
use banter_types::ModelInfo;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct ModelsResponse {
    pub success: bool,
    pub models: Vec<ModelInfo>,
}

/// List the selectable models
///
/// The same ids form the allow-list for `POST /messages`.
#[utoipa::path(
    get,
    path = "/models",
    responses(
        (status = 200, description = "Model catalog", body = ModelsResponse)
    ),
    tag = "models"
)]
pub async fn list_models(State(state): State<Arc<AppState>>) -> Json<ModelsResponse> {
    Json(ModelsResponse {
        success: true,
        models: state.catalog.models().to_vec(),
    })
}
