//! Vector store factory

use std::sync::Arc;

use crate::config::{VectorStoreBackend, VectorStoreConfig};
use crate::domain::{ApiKey, IndexName, VectorStore};
use crate::infrastructure::http_client::HttpClient;

use super::in_memory::InMemoryVectorRegistry;
use super::pinecone::{PineconeConfig, PineconeVectorStore};

/// Factory for creating vector stores
#[derive(Debug, Clone)]
pub struct VectorStoreFactory {
    config: VectorStoreConfig,
    registry: InMemoryVectorRegistry,
}

impl VectorStoreFactory {
    pub fn new(config: VectorStoreConfig) -> Self {
        Self {
            config,
            registry: InMemoryVectorRegistry::new(),
        }
    }

    pub fn backend(&self) -> VectorStoreBackend {
        self.config.backend
    }

    /// Create a store for the configured backend bound to `index`
    pub fn create(
        &self,
        http_client: HttpClient,
        api_key: ApiKey,
        index: IndexName,
    ) -> Arc<dyn VectorStore> {
        match self.config.backend {
            VectorStoreBackend::Pinecone => Arc::new(PineconeVectorStore::new(
                http_client,
                api_key,
                index,
                self.pinecone_config(),
            )),
            VectorStoreBackend::InMemory => Arc::new(self.registry.store(index)),
        }
    }

    fn pinecone_config(&self) -> PineconeConfig {
        PineconeConfig {
            control_plane_url: self.config.control_plane_url.clone(),
            api_version: self.config.api_version.clone(),
            index_host: self.config.index_host.clone(),
        }
    }
}
