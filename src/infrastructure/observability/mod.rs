//! Observability infrastructure - Prometheus metrics

mod config;
mod metrics;

pub use config::{MetricsConfig, ObservabilityConfig};
pub use metrics::{
    create_metrics_router, init_metrics, record_assistant_operation, record_http_request,
    AssistantOperation, PrometheusMetrics,
};
