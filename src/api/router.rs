use std::path::Path;

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::response::Redirect;
use axum::routing::get;
use axum::Router;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use super::assistant;
use super::health;
use super::middleware::{
    logging_middleware, metrics_middleware, security_headers_middleware, MAX_BODY_SIZE,
};
use super::state::AppState;
use crate::infrastructure::observability::{create_metrics_router, PrometheusMetrics};

/// Prometheus endpoint mounted next to the application routes
pub struct MetricsEndpoint {
    pub metrics: PrometheusMetrics,
    pub path: String,
}

/// Create the full router: health checks, assistant API and the chat UI
pub fn create_router(
    state: AppState,
    public_dir: &Path,
    metrics: Option<MetricsEndpoint>,
) -> Router {
    let mut router = Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Assistant API consumed by the UI
        .nest("/api", assistant::create_assistant_router())
        // UI static files
        .nest_service(
            "/ui",
            ServeDir::new(public_dir).fallback(ServeFile::new(public_dir.join("index.html"))),
        )
        // Redirect root to UI
        .route("/", get(|| async { Redirect::permanent("/ui/") }))
        // Add state and middleware
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

    if let Some(endpoint) = metrics {
        router = router.merge(create_metrics_router(endpoint.metrics, &endpoint.path));
    }

    router
}
