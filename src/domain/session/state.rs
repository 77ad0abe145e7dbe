//! Session state machine
//!
//! A session is either `Unconfigured` or `Ready`. Only a Ready session owns
//! clients, so ingestion and answering cannot run before a credential exists.

use std::fmt;
use std::sync::Arc;

use super::settings::SessionSettings;
use crate::domain::{
    ChatMessage, ContextSelector, ConversationLog, DomainError, EmbeddingProvider, LlmProvider,
    VectorStore,
};

/// Notice shown while no credential has been supplied
pub const CONFIGURATION_REQUIRED_NOTICE: &str =
    "Please enter your Pinecone API Key in the sidebar to start.";

/// Client handles built for one configuration
#[derive(Clone)]
pub struct AssistantClients {
    pub embedding: Arc<dyn EmbeddingProvider>,
    pub vector_store: Arc<dyn VectorStore>,
    pub llm: Arc<dyn LlmProvider>,
    /// Chat model passed to `llm` on every request
    pub llm_model: String,
}

impl fmt::Debug for AssistantClients {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssistantClients")
            .field("embedding", &self.embedding.provider_name())
            .field("vector_store", &self.vector_store.provider_type())
            .field("llm", &self.llm.provider_name())
            .field("llm_model", &self.llm_model)
            .finish()
    }
}

/// State of a configured session
#[derive(Debug, Clone)]
pub struct ReadySession {
    pub settings: SessionSettings,
    pub clients: AssistantClients,
}

#[derive(Debug, Clone, Default)]
pub enum SessionState {
    #[default]
    Unconfigured,
    Ready(ReadySession),
}

/// The single operator session
#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
    context: ContextSelector,
    log: ConversationLog,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, SessionState::Ready(_))
    }

    /// The Ready state, or the configuration notice as an error
    pub fn ready(&self) -> Result<&ReadySession, DomainError> {
        match &self.state {
            SessionState::Ready(ready) => Ok(ready),
            SessionState::Unconfigured => {
                Err(DomainError::not_configured(CONFIGURATION_REQUIRED_NOTICE))
            }
        }
    }

    /// Enter Ready with freshly built clients, replacing any previous ones
    pub fn configure(&mut self, settings: SessionSettings, clients: AssistantClients) {
        self.state = SessionState::Ready(ReadySession { settings, clients });
    }

    /// Drop clients and credential; the transcript is kept
    pub fn unconfigure(&mut self) {
        self.state = SessionState::Unconfigured;
    }

    pub fn context(&self) -> ContextSelector {
        self.context
    }

    pub fn select_context(&mut self, context: ContextSelector) {
        self.context = context;
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    pub fn append_message(&mut self, message: ChatMessage) {
        self.log.append(message);
    }

    /// Tear the session down completely
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::ApiKey;
    use crate::domain::vector_store::IndexName;
    use crate::domain::{MockEmbeddingProvider, MockLlmProvider, MockVectorStore};

    fn clients() -> AssistantClients {
        AssistantClients {
            embedding: Arc::new(MockEmbeddingProvider::new(8)),
            vector_store: Arc::new(MockVectorStore::new(IndexName::new("jarvis").unwrap())),
            llm: Arc::new(MockLlmProvider::new()),
            llm_model: "llama3".to_string(),
        }
    }

    fn settings() -> SessionSettings {
        SessionSettings::new(
            ApiKey::new("pc-secret").unwrap(),
            IndexName::new("jarvis").unwrap(),
        )
    }

    #[test]
    fn test_new_session_is_unconfigured() {
        let session = Session::new();

        assert!(!session.is_ready());
        assert_eq!(session.context(), ContextSelector::General);
        assert!(session.log().is_empty());
    }

    #[test]
    fn test_unconfigured_session_reports_notice() {
        let session = Session::new();

        let err = session.ready().unwrap_err();
        assert!(matches!(err, DomainError::NotConfigured { .. }));
        assert_eq!(err.to_string(), CONFIGURATION_REQUIRED_NOTICE);
    }

    #[test]
    fn test_configure_then_unconfigure_keeps_transcript() {
        let mut session = Session::new();
        session.configure(settings(), clients());
        assert!(session.is_ready());
        assert_eq!(session.ready().unwrap().settings.index_name.as_str(), "jarvis");

        session.append_message(ChatMessage::user("hi"));
        session.unconfigure();

        assert!(!session.is_ready());
        assert_eq!(session.log().len(), 1);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut session = Session::new();
        session.configure(settings(), clients());
        session.select_context(ContextSelector::ItSupport);
        session.append_message(ChatMessage::user("hi"));

        session.reset();

        assert!(!session.is_ready());
        assert_eq!(session.context(), ContextSelector::General);
        assert!(session.log().is_empty());
    }
}
