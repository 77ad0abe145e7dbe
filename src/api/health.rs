//! Liveness and readiness endpoints

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse};

use crate::api::types::Json;
use serde::Serialize;

use super::state::AppState;
use crate::infrastructure::services::SessionHealth;

/// Detailed health response with component status
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<Vec<HealthCheck>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

/// Health check status
#[derive(Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Individual component health check
#[derive(Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

/// Simple health check - returns 200 if the service is running
/// Used for basic liveness checks
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: None,
        latency_ms: None,
    };

    (StatusCode::OK, Json(response))
}

/// Readiness check with dependency verification
///
/// Reports the session state and, once configured, the vector store's health.
/// An unconfigured or degraded session still accepts requests.
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let start = Instant::now();
    let (overall_status, checks) = session_checks(&state).await;

    let latency = start.elapsed().as_millis() as u64;
    let response = HealthResponse {
        status: overall_status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: Some(checks),
        latency_ms: Some(latency),
    };

    let status_code = match overall_status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(response))
}

/// Liveness check - simple check to verify the service is running
/// Used for Kubernetes liveness checks to detect crashes
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}

async fn session_checks(state: &AppState) -> (HealthStatus, Vec<HealthCheck>) {
    let start = Instant::now();
    let health = state.session_service.health().await;
    let latency_ms = Some(start.elapsed().as_millis() as u64);

    match health {
        SessionHealth::Unconfigured => (
            HealthStatus::Degraded,
            vec![HealthCheck {
                name: "session".to_string(),
                status: HealthStatus::Degraded,
                message: Some("Session is not configured".to_string()),
                latency_ms: None,
            }],
        ),
        SessionHealth::Healthy { vector_store } => (
            HealthStatus::Healthy,
            vec![
                HealthCheck {
                    name: "session".to_string(),
                    status: HealthStatus::Healthy,
                    message: None,
                    latency_ms: None,
                },
                HealthCheck {
                    name: vector_store.to_string(),
                    status: HealthStatus::Healthy,
                    message: None,
                    latency_ms,
                },
            ],
        ),
        SessionHealth::Unhealthy {
            vector_store,
            error,
        } => (
            HealthStatus::Degraded,
            vec![
                HealthCheck {
                    name: "session".to_string(),
                    status: HealthStatus::Healthy,
                    message: None,
                    latency_ms: None,
                },
                HealthCheck {
                    name: vector_store.to_string(),
                    status: HealthStatus::Unhealthy,
                    message: Some(error),
                    latency_ms,
                },
            ],
        ),
    }
}
