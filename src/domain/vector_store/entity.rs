//! Index and namespace identifiers

use serde::{Deserialize, Serialize};

use super::validation::{validate_index_name, VectorStoreValidationError};
use crate::domain::ContextSelector;

/// Name of a vector index - lowercase alphanumerics and hyphens, max 45 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IndexName(String);

impl IndexName {
    /// Create a new IndexName after validation
    pub fn new(name: impl Into<String>) -> Result<Self, VectorStoreValidationError> {
        let name = name.into();
        validate_index_name(&name)?;
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for IndexName {
    type Error = VectorStoreValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<IndexName> for String {
    fn from(name: IndexName) -> Self {
        name.0
    }
}

impl std::fmt::Display for IndexName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Partition key inside an index
///
/// Only built from a [`ContextSelector`], so every read and write is scoped to
/// exactly one department context.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace(&'static str);

impl Namespace {
    pub fn as_str(&self) -> &str {
        self.0
    }
}

impl From<ContextSelector> for Namespace {
    fn from(context: ContextSelector) -> Self {
        Self(context.label())
    }
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}
