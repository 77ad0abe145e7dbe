//! Domain layer - Core business logic and entities

pub mod context;
pub mod conversation;
pub mod embedding;
pub mod error;
pub mod llm;
pub mod prompt;
pub mod session;
pub mod vector_store;

pub use context::ContextSelector;
pub use conversation::{ChatMessage, ChatRole, ConversationLog};
pub use embedding::{Embedding, EmbeddingProvider, EmbeddingRequest, EmbeddingResponse};
pub use error::DomainError;
pub use llm::{
    FinishReason, LlmProvider, LlmRequest, LlmRequestBuilder, LlmResponse, Message, MessageRole,
    Usage,
};
pub use prompt::{render_rag_prompt, PromptTemplate, TemplateError};
pub use session::{
    ApiKey, AssistantClients, ReadySession, Session, SessionSettings, SessionState,
    CONFIGURATION_REQUIRED_NOTICE,
};
pub use vector_store::{
    IndexName, Namespace, QueryMatch, QueryParams, UpsertResult, VectorRecord, VectorStore,
};

#[cfg(test)]
pub use embedding::MockEmbeddingProvider;
#[cfg(test)]
pub use llm::MockLlmProvider;
#[cfg(test)]
pub use vector_store::MockVectorStore;
