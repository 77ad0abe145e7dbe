//! LLM provider implementations

mod ollama;

pub use ollama::{OllamaProvider, DEFAULT_CHAT_MODEL};
