//! Application state for shared services

use std::sync::Arc;

use crate::domain::{ChatMessage, ContextSelector, DomainError};
use crate::infrastructure::services::{
    ConfigureSessionRequest, IngestOutcome, SessionHealth, SessionService, SessionStatus,
};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub session_service: Arc<dyn SessionServiceTrait>,
}

impl AppState {
    pub fn new(session_service: Arc<dyn SessionServiceTrait>) -> Self {
        Self { session_service }
    }
}

/// Trait for session service operations
#[async_trait::async_trait]
pub trait SessionServiceTrait: Send + Sync {
    fn default_index_name(&self) -> &str;
    async fn status(&self) -> SessionStatus;
    async fn configure(&self, request: ConfigureSessionRequest)
        -> Result<SessionStatus, DomainError>;
    async fn select_context(&self, context: ContextSelector) -> SessionStatus;
    async fn reset(&self) -> SessionStatus;
    async fn ingest(
        &self,
        text: &str,
        context: Option<ContextSelector>,
    ) -> Result<IngestOutcome, DomainError>;
    async fn ask(
        &self,
        question: &str,
        context: Option<ContextSelector>,
    ) -> Result<ChatMessage, DomainError>;
    async fn messages(&self) -> Vec<ChatMessage>;
    async fn health(&self) -> SessionHealth;
}

#[async_trait::async_trait]
impl SessionServiceTrait for SessionService {
    fn default_index_name(&self) -> &str {
        SessionService::default_index_name(self)
    }

    async fn status(&self) -> SessionStatus {
        SessionService::status(self).await
    }

    async fn configure(
        &self,
        request: ConfigureSessionRequest,
    ) -> Result<SessionStatus, DomainError> {
        SessionService::configure(self, request).await
    }

    async fn select_context(&self, context: ContextSelector) -> SessionStatus {
        SessionService::select_context(self, context).await
    }

    async fn reset(&self) -> SessionStatus {
        SessionService::reset(self).await
    }

    async fn ingest(
        &self,
        text: &str,
        context: Option<ContextSelector>,
    ) -> Result<IngestOutcome, DomainError> {
        SessionService::ingest(self, text, context).await
    }

    async fn ask(
        &self,
        question: &str,
        context: Option<ContextSelector>,
    ) -> Result<ChatMessage, DomainError> {
        SessionService::ask(self, question, context).await
    }

    async fn messages(&self) -> Vec<ChatMessage> {
        SessionService::messages(self).await
    }

    async fn health(&self) -> SessionHealth {
        SessionService::health(self).await
    }
}
