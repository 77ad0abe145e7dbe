//! Knowledge ingestion into the selected context

use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info};
use uuid::Uuid;

use crate::domain::{
    AssistantClients, ContextSelector, DomainError, EmbeddingProvider, Namespace, VectorRecord,
    VectorStore,
};
use crate::infrastructure::observability::{record_assistant_operation, AssistantOperation};

/// Result of an ingestion request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    /// Empty input; nothing was embedded or stored
    Skipped,
    Stored { id: String, namespace: String },
}

impl IngestOutcome {
    /// Confirmation shown to the operator
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Skipped => None,
            Self::Stored { namespace, .. } => Some(format!("Stored in {} memory!", namespace)),
        }
    }
}

/// Embeds free text and writes it as a single vector
#[derive(Debug, Clone)]
pub struct IngestionService {
    embedding: Arc<dyn EmbeddingProvider>,
    vector_store: Arc<dyn VectorStore>,
}

impl IngestionService {
    pub fn new(embedding: Arc<dyn EmbeddingProvider>, vector_store: Arc<dyn VectorStore>) -> Self {
        Self {
            embedding,
            vector_store,
        }
    }

    pub fn from_clients(clients: &AssistantClients) -> Self {
        Self::new(clients.embedding.clone(), clients.vector_store.clone())
    }

    /// Store `text` under the namespace of `context`
    ///
    /// Not idempotent: the same text ingested twice is stored twice.
    pub async fn ingest(
        &self,
        text: &str,
        context: ContextSelector,
    ) -> Result<IngestOutcome, DomainError> {
        if text.is_empty() {
            return Ok(IngestOutcome::Skipped);
        }

        let namespace = Namespace::from(context);
        let started = Instant::now();

        let result = self.store(text, &namespace).await;
        record_assistant_operation(
            AssistantOperation::Ingest,
            namespace.as_str(),
            result.is_ok(),
            started.elapsed(),
        );

        match result {
            Ok(id) => {
                info!(
                    namespace = %namespace,
                    index = %self.vector_store.index_name(),
                    id = %id,
                    chars = text.len(),
                    "Stored knowledge item"
                );

                Ok(IngestOutcome::Stored {
                    id,
                    namespace: namespace.as_str().to_string(),
                })
            }
            Err(e) => {
                error!(namespace = %namespace, error = %e, "Knowledge ingestion failed");
                Err(e)
            }
        }
    }

    async fn store(&self, text: &str, namespace: &Namespace) -> Result<String, DomainError> {
        let values = self.embedding.embed_text(text).await?;
        let id = Uuid::new_v4().to_string();

        self.vector_store
            .upsert(namespace, vec![VectorRecord::new(&id, values, text)])
            .await?;

        Ok(id)
    }
}
