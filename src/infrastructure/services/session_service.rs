//! Single operator session: configuration gate, ingestion and chat turns
//!
//! Every operation holds the session lock until it completes, so actions run
//! strictly one after another.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use super::answer_service::{AnswerService, AnswerSettings};
use super::client_factory::ClientFactory;
use super::ingestion_service::{IngestOutcome, IngestionService};
use crate::domain::{
    ApiKey, ChatMessage, ContextSelector, DomainError, IndexName, Session, SessionSettings,
    CONFIGURATION_REQUIRED_NOTICE,
};

/// Operator input for configuring the session
#[derive(Debug, Clone, Default)]
pub struct ConfigureSessionRequest {
    pub api_key: String,
    pub index_name: Option<String>,
    pub context: Option<ContextSelector>,
}

/// Snapshot of the session for the UI
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStatus {
    pub ready: bool,
    pub index_name: Option<String>,
    pub context: ContextSelector,
    /// Blocking notice while unconfigured
    pub warning: Option<String>,
    pub message_count: usize,
}

/// Readiness of the session's downstream services
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionHealth {
    Unconfigured,
    Healthy { vector_store: &'static str },
    Unhealthy { vector_store: &'static str, error: String },
}

#[derive(Debug)]
pub struct SessionService {
    session: Mutex<Session>,
    factory: Arc<dyn ClientFactory>,
    default_index_name: String,
    answer_settings: AnswerSettings,
}

impl SessionService {
    pub fn new(
        factory: Arc<dyn ClientFactory>,
        default_index_name: impl Into<String>,
        answer_settings: AnswerSettings,
    ) -> Self {
        Self {
            session: Mutex::new(Session::new()),
            factory,
            default_index_name: default_index_name.into(),
            answer_settings,
        }
    }

    pub fn default_index_name(&self) -> &str {
        &self.default_index_name
    }

    pub async fn status(&self) -> SessionStatus {
        let session = self.session.lock().await;
        Self::snapshot(&session)
    }

    /// Apply operator settings
    ///
    /// An empty credential leaves the session Unconfigured. Otherwise a fresh
    /// client set is built and the session becomes Ready. No remote service is
    /// contacted here.
    pub async fn configure(
        &self,
        request: ConfigureSessionRequest,
    ) -> Result<SessionStatus, DomainError> {
        let Some(api_key) = ApiKey::new(request.api_key) else {
            let mut session = self.session.lock().await;

            if let Some(context) = request.context {
                session.select_context(context);
            }

            if session.is_ready() {
                info!("Credential cleared; session unconfigured");
            }
            session.unconfigure();

            return Ok(Self::snapshot(&session));
        };

        let index_name = request
            .index_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.default_index_name);

        let index_name =
            IndexName::new(index_name).map_err(|e| DomainError::validation(e.to_string()))?;

        let mut session = self.session.lock().await;

        let settings = SessionSettings::new(api_key, index_name);
        let clients = self.factory.create_clients(&settings)?;

        if let Some(context) = request.context {
            session.select_context(context);
        }

        info!(
            index = %settings.index_name,
            context = %session.context(),
            vector_store = clients.vector_store.provider_type(),
            "Session configured"
        );

        session.configure(settings, clients);

        Ok(Self::snapshot(&session))
    }

    pub async fn select_context(&self, context: ContextSelector) -> SessionStatus {
        let mut session = self.session.lock().await;
        session.select_context(context);

        info!(context = %context, "Context selected");
        Self::snapshot(&session)
    }

    /// Tear down the session: credential, clients and transcript
    pub async fn reset(&self) -> SessionStatus {
        let mut session = self.session.lock().await;
        session.reset();

        info!("Session reset");
        Self::snapshot(&session)
    }

    /// Store free text in the active (or given) context
    pub async fn ingest(
        &self,
        text: &str,
        context: Option<ContextSelector>,
    ) -> Result<IngestOutcome, DomainError> {
        let mut session = self.session.lock().await;
        let ready = session.ready()?.clone();

        if let Some(context) = context {
            session.select_context(context);
        }

        IngestionService::from_clients(&ready.clients)
            .ingest(text, session.context())
            .await
    }

    /// Run one chat turn and return the assistant message
    ///
    /// The question is logged before the model is called; the answer is
    /// logged only on success.
    pub async fn ask(
        &self,
        question: &str,
        context: Option<ContextSelector>,
    ) -> Result<ChatMessage, DomainError> {
        if question.trim().is_empty() {
            return Err(DomainError::validation("Question cannot be empty"));
        }

        let mut session = self.session.lock().await;
        let ready = session.ready()?.clone();

        if let Some(context) = context {
            session.select_context(context);
        }

        session.append_message(ChatMessage::user(question));

        let answer = AnswerService::from_clients(&ready.clients, self.answer_settings)
            .answer(question, session.context())
            .await?;

        let message = ChatMessage::assistant(answer.content);
        session.append_message(message.clone());

        Ok(message)
    }

    /// Full transcript in chronological order
    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.session.lock().await.log().render_all().to_vec()
    }

    pub async fn health(&self) -> SessionHealth {
        let session = self.session.lock().await;

        let Ok(ready) = session.ready() else {
            return SessionHealth::Unconfigured;
        };

        let store = &ready.clients.vector_store;
        let vector_store = store.provider_type();

        match store.health_check().await {
            Ok(true) => SessionHealth::Healthy { vector_store },
            Ok(false) => SessionHealth::Unhealthy {
                vector_store,
                error: "health check returned false".to_string(),
            },
            Err(e) => {
                warn!(error = %e, "Vector store health check failed");
                SessionHealth::Unhealthy {
                    vector_store,
                    error: e.to_string(),
                }
            }
        }
    }

    fn snapshot(session: &Session) -> SessionStatus {
        let ready = session.ready().ok();

        SessionStatus {
            ready: ready.is_some(),
            index_name: ready.map(|r| r.settings.index_name.to_string()),
            context: session.context(),
            warning: ready
                .is_none()
                .then(|| CONFIGURATION_REQUIRED_NOTICE.to_string()),
            message_count: session.log().len(),
        }
    }
}
