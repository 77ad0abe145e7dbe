//! Vector store domain - namespaced similarity search

mod entity;
mod provider;
mod record;
mod validation;

pub use entity::{IndexName, Namespace};
pub use provider::VectorStore;
pub use record::{QueryMatch, QueryParams, UpsertResult, VectorRecord, TEXT_METADATA_KEY};
pub use validation::{validate_index_name, validate_top_k, VectorStoreValidationError};

#[cfg(test)]
pub use provider::mock::MockVectorStore;
