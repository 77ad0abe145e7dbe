//! Enterprise Jarvis
//!
//! A retrieval-augmented assistant for department knowledge:
//! - Free-text knowledge stored per department context in a namespaced vector index
//! - Questions answered strictly from the top matching passages
//! - Single operator session configured from the chat UI

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use infrastructure::services::{AnswerSettings, ProviderClientFactory, SessionService};
use tracing::info;

/// Create the application state from configuration
///
/// The session starts unconfigured; no remote service is contacted here.
pub fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let factory = Arc::new(ProviderClientFactory::new(config));
    let answer_settings = AnswerSettings::new(config.retrieval.top_k, config.llm.temperature)?;

    let session_service = SessionService::new(
        factory,
        config.session.default_index_name.clone(),
        answer_settings,
    );

    info!(
        default_index_name = %config.session.default_index_name,
        top_k = config.retrieval.top_k,
        "Application state initialized"
    );

    Ok(AppState::new(Arc::new(session_service)))
}
