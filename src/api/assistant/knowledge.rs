//! Knowledge ingestion endpoint

use axum::extract::State;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, IngestRequest, IngestResponse, Json};

/// POST /api/knowledge
pub async fn add_knowledge(
    State(state): State<AppState>,
    Json(request): Json<IngestRequest>,
) -> Result<Json<IngestResponse>, ApiError> {
    debug!(
        chars = request.text.chars().count(),
        context = ?request.context,
        "Adding knowledge"
    );

    let outcome = state
        .session_service
        .ingest(&request.text, request.context)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(IngestResponse::from(outcome)))
}
