mod app_config;

pub use app_config::{
    AppConfig, EmbeddingConfig, HttpConfig, LlmConfig, LogFormat, LoggingConfig, RetrievalConfig,
    ServerConfig, SessionConfig, VectorStoreBackend, VectorStoreConfig,
};
