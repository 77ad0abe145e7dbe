//! Records written to and read from a vector store

use std::collections::HashMap;

use serde_json::Value;

/// Metadata key holding the source text of a stored vector
pub const TEXT_METADATA_KEY: &str = "text";

/// A vector with its source text, ready to be written
#[derive(Debug, Clone)]
pub struct VectorRecord {
    pub id: String,
    pub values: Vec<f32>,
    pub text: String,
    pub metadata: HashMap<String, Value>,
}

impl VectorRecord {
    pub fn new(id: impl Into<String>, values: Vec<f32>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            values,
            text: text.into(),
            metadata: HashMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Metadata as stored, with the source text under [`TEXT_METADATA_KEY`]
    pub fn stored_metadata(&self) -> HashMap<String, Value> {
        let mut metadata = self.metadata.clone();
        metadata.insert(TEXT_METADATA_KEY.to_string(), Value::String(self.text.clone()));
        metadata
    }
}

/// Nearest-neighbour query
#[derive(Debug, Clone)]
pub struct QueryParams {
    pub vector: Vec<f32>,
    pub top_k: u32,
}

impl QueryParams {
    pub fn new(vector: Vec<f32>, top_k: u32) -> Self {
        Self { vector, top_k }
    }
}

/// A stored item returned by a query, closest first
#[derive(Debug, Clone, PartialEq)]
pub struct QueryMatch {
    pub id: String,
    pub text: String,
    pub score: f32,
}

impl QueryMatch {
    pub fn new(id: impl Into<String>, text: impl Into<String>, score: f32) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            score,
        }
    }
}

/// Result of an upsert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertResult {
    pub upserted: usize,
}

impl UpsertResult {
    pub fn new(upserted: usize) -> Self {
        Self { upserted }
    }
}
