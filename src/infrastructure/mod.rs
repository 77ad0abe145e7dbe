//! Infrastructure layer - External service implementations

pub mod embedding;
pub mod http_client;
pub mod llm;
pub mod logging;
pub mod markdown;
pub mod observability;
pub mod services;
pub mod vector_store;

pub use http_client::{HttpClient, HttpClientTrait};
