//! Department context selector
//!
//! The selector label doubles as the vector-store namespace, so the labels
//! below are part of the stored data layout and must not change.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// Department context an operator works in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ContextSelector {
    #[default]
    General,
    HrPolicy,
    ItSupport,
}

impl ContextSelector {
    /// All selectable contexts, in display order
    pub const ALL: [ContextSelector; 3] = [Self::General, Self::HrPolicy, Self::ItSupport];

    /// Display label, also used verbatim as the namespace
    pub fn label(&self) -> &'static str {
        match self {
            Self::General => "General",
            Self::HrPolicy => "HR Policy",
            Self::ItSupport => "IT Support",
        }
    }

    /// Labels of every context, in display order
    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.label()).collect()
    }
}

impl fmt::Display for ContextSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ContextSelector {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.label() == s)
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "Unknown context '{}': expected one of {}",
                    s,
                    Self::labels().join(", ")
                ))
            })
    }
}

impl TryFrom<String> for ContextSelector {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ContextSelector> for String {
    fn from(context: ContextSelector) -> Self {
        context.label().to_string()
    }
}
