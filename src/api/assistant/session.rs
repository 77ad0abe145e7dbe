//! Session configuration endpoints

use axum::extract::State;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, ConfigureSessionBody, Json, SelectContextRequest, SessionResponse};

/// GET /api/session
pub async fn get_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let status = state.session_service.status().await;

    Json(SessionResponse::from_status(
        status,
        state.session_service.default_index_name(),
    ))
}

/// PUT /api/session
pub async fn configure_session(
    State(state): State<AppState>,
    Json(body): Json<ConfigureSessionBody>,
) -> Result<Json<SessionResponse>, ApiError> {
    debug!(
        index_name = ?body.index_name,
        context = ?body.context,
        "Configuring session"
    );

    let status = state
        .session_service
        .configure(body.into())
        .await
        .map_err(ApiError::from)?;

    Ok(Json(SessionResponse::from_status(
        status,
        state.session_service.default_index_name(),
    )))
}

/// PUT /api/session/context
pub async fn select_context(
    State(state): State<AppState>,
    Json(request): Json<SelectContextRequest>,
) -> Json<SessionResponse> {
    debug!(context = %request.context.label(), "Selecting context");

    let status = state.session_service.select_context(request.context).await;

    Json(SessionResponse::from_status(
        status,
        state.session_service.default_index_name(),
    ))
}

/// DELETE /api/session
pub async fn reset_session(State(state): State<AppState>) -> Json<SessionResponse> {
    debug!("Resetting session");

    let status = state.session_service.reset().await;

    Json(SessionResponse::from_status(
        status,
        state.session_service.default_index_name(),
    ))
}
