//! Retrieval-augmented answering

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info};

use crate::domain::vector_store::validate_top_k;
use crate::domain::{
    render_rag_prompt, AssistantClients, ContextSelector, DomainError, EmbeddingProvider,
    LlmProvider, LlmRequest, Namespace, QueryMatch, QueryParams, VectorStore,
};
use crate::infrastructure::observability::{record_assistant_operation, AssistantOperation};

/// Retrieval and generation parameters
#[derive(Debug, Clone, Copy)]
pub struct AnswerSettings {
    pub top_k: u32,
    pub temperature: f32,
}

impl AnswerSettings {
    pub fn new(top_k: u32, temperature: f32) -> Result<Self, DomainError> {
        validate_top_k(top_k).map_err(|e| DomainError::configuration(e.to_string()))?;
        Ok(Self { top_k, temperature })
    }
}

impl Default for AnswerSettings {
    fn default() -> Self {
        Self {
            top_k: 3,
            temperature: 0.0,
        }
    }
}

/// A generated answer with the passages it was grounded on
#[derive(Debug, Clone)]
pub struct GroundedAnswer {
    /// Model output, verbatim
    pub content: String,
    pub sources: Vec<QueryMatch>,
}

/// Answers a question from passages stored in one context
#[derive(Debug, Clone)]
pub struct AnswerService {
    embedding: Arc<dyn EmbeddingProvider>,
    vector_store: Arc<dyn VectorStore>,
    llm: Arc<dyn LlmProvider>,
    model: String,
    settings: AnswerSettings,
}

impl AnswerService {
    pub fn new(
        embedding: Arc<dyn EmbeddingProvider>,
        vector_store: Arc<dyn VectorStore>,
        llm: Arc<dyn LlmProvider>,
        model: impl Into<String>,
        settings: AnswerSettings,
    ) -> Self {
        Self {
            embedding,
            vector_store,
            llm,
            model: model.into(),
            settings,
        }
    }

    pub fn from_clients(clients: &AssistantClients, settings: AnswerSettings) -> Self {
        Self::new(
            clients.embedding.clone(),
            clients.vector_store.clone(),
            clients.llm.clone(),
            &clients.llm_model,
            settings,
        )
    }

    pub async fn answer(
        &self,
        question: &str,
        context: ContextSelector,
    ) -> Result<GroundedAnswer, DomainError> {
        let namespace = Namespace::from(context);
        let started = Instant::now();

        let result = self.generate(question, &namespace).await;
        record_assistant_operation(
            AssistantOperation::Answer,
            namespace.as_str(),
            result.is_ok(),
            started.elapsed(),
        );

        match &result {
            Ok(answer) => info!(
                namespace = %namespace,
                retrieved = answer.sources.len(),
                answer_chars = answer.content.len(),
                "Answered question"
            ),
            Err(e) => error!(namespace = %namespace, error = %e, "Answering failed"),
        }

        result
    }

    async fn generate(
        &self,
        question: &str,
        namespace: &Namespace,
    ) -> Result<GroundedAnswer, DomainError> {
        let vector = self.embedding.embed_text(question).await?;

        let sources = self
            .vector_store
            .query(namespace, QueryParams::new(vector, self.settings.top_k))
            .await?;

        let documents: Vec<&str> = sources.iter().map(|m| m.text.as_str()).collect();
        let prompt = render_rag_prompt(&documents, question);

        debug!(
            namespace = %namespace,
            documents = documents.len(),
            prompt_chars = prompt.len(),
            "Built grounded prompt"
        );

        let request = LlmRequest::builder()
            .user(prompt)
            .temperature(self.settings.temperature)
            .build();

        let response = self.llm.chat(&self.model, request).await?;

        Ok(GroundedAnswer {
            content: response.into_content(),
            sources,
        })
    }
}
