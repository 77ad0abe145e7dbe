//! Builds the client set a Ready session owns

use std::fmt::Debug;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::domain::{AssistantClients, DomainError, SessionSettings};
use crate::infrastructure::embedding::OllamaEmbeddingProvider;
use crate::infrastructure::http_client::HttpClient;
use crate::infrastructure::llm::OllamaProvider;
use crate::infrastructure::vector_store::VectorStoreFactory;

/// Creates embedding, vector store and language model clients for a session
///
/// Called on every configure; must not contact any remote service.
pub trait ClientFactory: Send + Sync + Debug {
    fn create_clients(&self, settings: &SessionSettings) -> Result<AssistantClients, DomainError>;
}

/// Factory for the Ollama + Pinecone (or in-memory) stack
#[derive(Debug, Clone)]
pub struct ProviderClientFactory {
    config: AppConfig,
    vector_stores: VectorStoreFactory,
}

impl ProviderClientFactory {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            config: config.clone(),
            vector_stores: VectorStoreFactory::new(config.vector_store.clone()),
        }
    }
}

impl ClientFactory for ProviderClientFactory {
    fn create_clients(&self, settings: &SessionSettings) -> Result<AssistantClients, DomainError> {
        let http_client = HttpClient::with_timeout(self.config.http.timeout())?;

        let embedding = OllamaEmbeddingProvider::with_base_url(
            http_client.clone(),
            &self.config.embedding.model,
            &self.config.embedding.base_url,
        );

        let llm = OllamaProvider::with_base_url(http_client.clone(), &self.config.llm.base_url);

        let vector_store = self.vector_stores.create(
            http_client,
            settings.api_key.clone(),
            settings.index_name.clone(),
        );

        Ok(AssistantClients {
            embedding: Arc::new(embedding),
            vector_store,
            llm: Arc::new(llm),
            llm_model: self.config.llm.model.clone(),
        })
    }
}
