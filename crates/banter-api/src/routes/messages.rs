use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use banter_persist::StoredMessage;
use banter_types::ChatMessage;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::{ApiError, ApiResult, ErrorResponse};
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct MessagesResponse {
    pub success: bool,
    pub messages: Vec<ChatMessage>,
}

impl MessagesResponse {
    fn from_history(history: Vec<StoredMessage>) -> Self {
        Self {
            success: true,
            messages: history.into_iter().map(ChatMessage::from).collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub text: Option<String>,
    /// Must be a catalog id; anything else selects the default model
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClearResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub success: bool,
    pub total_messages: u64,
    pub total_tokens: u64,
}

/// Full chat history, oldest first
#[utoipa::path(
    get,
    path = "/messages",
    responses(
        (status = 200, description = "Chat history", body = MessagesResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "messages"
)]
pub async fn list_messages(State(state): State<Arc<AppState>>) -> ApiResult<Json<MessagesResponse>> {
    let history = state.messages.history().await?;
    Ok(Json(MessagesResponse::from_history(history)))
}

/// Store a user message, get and store the reply, return the history
#[utoipa::path(
    post,
    path = "/messages",
    request_body = SendMessageRequest,
    responses(
        (status = 200, description = "History including the new exchange", body = MessagesResponse),
        (status = 400, description = "Blank text or malformed body", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "messages"
)]
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> ApiResult<Json<MessagesResponse>> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "rejected message body");
        ApiError::BadRequest("Invalid request body".to_string())
    })?;

    let history = state
        .messages
        .send(
            request.text.as_deref().unwrap_or_default(),
            request.model.as_deref(),
        )
        .await?;

    Ok(Json(MessagesResponse::from_history(history)))
}

/// Delete the whole history
#[utoipa::path(
    post,
    path = "/messages/clear",
    responses(
        (status = 200, description = "History cleared", body = ClearResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "messages"
)]
pub async fn clear_messages(State(state): State<Arc<AppState>>) -> ApiResult<Json<ClearResponse>> {
    state.messages.clear().await?;
    Ok(Json(ClearResponse {
        success: true,
        message: "Chat history cleared.".to_string(),
    }))
}

/// Message count and estimated token total
#[utoipa::path(
    get,
    path = "/messages/stats",
    responses(
        (status = 200, description = "Aggregate stats", body = StatsResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "messages"
)]
pub async fn message_stats(State(state): State<Arc<AppState>>) -> ApiResult<Json<StatsResponse>> {
    let stats = state.messages.stats().await?;
    Ok(Json(StatsResponse {
        success: true,
        total_messages: stats.total_messages,
        total_tokens: stats.total_tokens,
    }))
}
