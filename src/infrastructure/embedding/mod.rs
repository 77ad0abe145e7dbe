//! Embedding provider implementations

mod ollama;

pub use ollama::{OllamaEmbeddingProvider, DEFAULT_EMBEDDING_MODEL, DEFAULT_OLLAMA_BASE_URL};
