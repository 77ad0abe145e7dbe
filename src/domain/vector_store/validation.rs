//! Vector store validation utilities

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum length for index names
pub const MAX_INDEX_NAME_LENGTH: usize = 45;

/// Lowercase alphanumerics and hyphens, starting and ending with an alphanumeric
static INDEX_NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9][a-z0-9-]*[a-z0-9]$|^[a-z0-9]$").unwrap());

/// Vector store validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum VectorStoreValidationError {
    EmptyIndexName,
    IndexNameTooLong { length: usize, max: usize },
    InvalidIndexName { name: String },
    InvalidTopK { value: u32, min: u32, max: u32 },
}

impl fmt::Display for VectorStoreValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyIndexName => write!(f, "Index name cannot be empty"),
            Self::IndexNameTooLong { length, max } => {
                write!(f, "Index name too long: {} characters (max {})", length, max)
            }
            Self::InvalidIndexName { name } => {
                write!(
                    f,
                    "Invalid index name '{}': must be lowercase alphanumeric with hyphens",
                    name
                )
            }
            Self::InvalidTopK { value, min, max } => {
                write!(f, "Invalid top_k {}: must be between {} and {}", value, min, max)
            }
        }
    }
}

impl std::error::Error for VectorStoreValidationError {}

/// Validate an index name
pub fn validate_index_name(name: &str) -> Result<(), VectorStoreValidationError> {
    if name.is_empty() {
        return Err(VectorStoreValidationError::EmptyIndexName);
    }

    if name.len() > MAX_INDEX_NAME_LENGTH {
        return Err(VectorStoreValidationError::IndexNameTooLong {
            length: name.len(),
            max: MAX_INDEX_NAME_LENGTH,
        });
    }

    if !INDEX_NAME_PATTERN.is_match(name) {
        return Err(VectorStoreValidationError::InvalidIndexName {
            name: name.to_string(),
        });
    }

    Ok(())
}

/// Validate a top_k value
pub fn validate_top_k(top_k: u32) -> Result<(), VectorStoreValidationError> {
    const MIN: u32 = 1;
    const MAX: u32 = 10_000;

    if !(MIN..=MAX).contains(&top_k) {
        return Err(VectorStoreValidationError::InvalidTopK {
            value: top_k,
            min: MIN,
            max: MAX,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_index_names() {
        assert!(validate_index_name("a").is_ok());
        assert!(validate_index_name("jarvis").is_ok());
        assert!(validate_index_name("hr-docs-2024").is_ok());
    }

    #[test]
    fn test_invalid_index_names() {
        assert!(matches!(
            validate_index_name(""),
            Err(VectorStoreValidationError::EmptyIndexName)
        ));

        let long_name = "a".repeat(46);
        assert!(matches!(
            validate_index_name(&long_name),
            Err(VectorStoreValidationError::IndexNameTooLong { .. })
        ));

        for bad in ["Jarvis", "my_index", "-jarvis", "jarvis-", "jar vis"] {
            assert!(
                matches!(
                    validate_index_name(bad),
                    Err(VectorStoreValidationError::InvalidIndexName { .. })
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_top_k_validation() {
        assert!(validate_top_k(1).is_ok());
        assert!(validate_top_k(3).is_ok());
        assert!(validate_top_k(0).is_err());
        assert!(validate_top_k(10_001).is_err());
    }
}
