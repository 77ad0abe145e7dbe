//! Operator-supplied session settings

use std::fmt;

use crate::domain::vector_store::IndexName;

/// Vector store credential held only in process memory
///
/// `Debug` and `Display` never reveal the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a raw credential verbatim, or `None` when it is empty
    ///
    /// Whitespace is kept as entered; the vector store decides whether the
    /// key is valid.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();

        if raw.is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    /// Raw credential, for building outbound request headers only
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// Settings a Ready session was built from
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub api_key: ApiKey,
    pub index_name: IndexName,
}

impl SessionSettings {
    pub fn new(api_key: ApiKey, index_name: IndexName) -> Self {
        Self {
            api_key,
            index_name,
        }
    }
}
