//! Chat turn and transcript endpoints

use axum::extract::State;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, ChatRequest, Json, MessageResponse, MessagesResponse};

/// GET /api/messages
pub async fn list_messages(State(state): State<AppState>) -> Json<MessagesResponse> {
    let messages = state.session_service.messages().await;

    Json(MessagesResponse::from(messages.as_slice()))
}

/// POST /api/chat
///
/// Returns the assistant's reply. The question itself is already part of
/// the transcript, even when the turn fails.
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    debug!(context = ?request.context, "Chat turn");

    let reply = state
        .session_service
        .ask(&request.question, request.context)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(MessageResponse::from(&reply)))
}
