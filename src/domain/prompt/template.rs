//! Prompt template parsing and rendering
//!
//! Supports variable syntax: `${var:variable-name:default-value}`
//! - `${var:name}` - Required variable, error if not provided
//! - `${var:name:default}` - Optional variable with default value
//!
//! Rendering is a single pass over the template text: substituted values are
//! never scanned again, so retrieved documents containing `${var:...}` are
//! inserted literally.

use std::borrow::Cow;
use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use thiserror::Error;

/// Regex to match variable patterns: ${var:name} or ${var:name:default}
static VARIABLE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{var:([a-zA-Z0-9][-a-zA-Z0-9]*)(?::([^}]*))?\}").unwrap()
});

/// Grounded question-answering prompt
pub const RAG_PROMPT_TEMPLATE: &str =
    "Answer the question based strictly on the following context:\n${var:context}\n\nQuestion: ${var:input}";

/// Template processing errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TemplateError {
    #[error("Missing required variable: {name}")]
    MissingVariable { name: String },
}

/// A parsed variable from a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptVariable {
    pub name: String,
    pub default: Option<String>,
    pub required: bool,
}

impl PromptVariable {
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
            required: true,
        }
    }

    pub fn with_default(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: Some(default.into()),
            required: false,
        }
    }
}

/// A parsed prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    content: String,
    variables: Vec<PromptVariable>,
}

impl PromptTemplate {
    /// Parse a template string and extract variables
    pub fn parse(content: impl Into<String>) -> Self {
        let content = content.into();
        let mut variables: Vec<PromptVariable> = Vec::new();

        for cap in VARIABLE_PATTERN.captures_iter(&content) {
            let name = &cap[1];

            if variables.iter().any(|v| v.name == name) {
                continue;
            }

            let variable = match cap.get(2) {
                Some(default) => PromptVariable::with_default(name, default.as_str()),
                None => PromptVariable::required(name),
            };

            variables.push(variable);
        }

        Self { content, variables }
    }

    /// The grounded question-answering template
    pub fn rag() -> Self {
        Self::parse(RAG_PROMPT_TEMPLATE)
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn variables(&self) -> &[PromptVariable] {
        &self.variables
    }

    /// Render the template with provided values
    pub fn render(&self, values: &HashMap<&str, &str>) -> Result<String, TemplateError> {
        if let Some(missing) = self
            .variables
            .iter()
            .find(|v| v.required && !values.contains_key(v.name.as_str()))
        {
            return Err(TemplateError::MissingVariable {
                name: missing.name.clone(),
            });
        }

        let rendered = VARIABLE_PATTERN.replace_all(&self.content, |cap: &Captures<'_>| {
            match values.get(&cap[1]) {
                Some(value) => Cow::Owned(value.to_string()),
                None => Cow::Owned(cap.get(2).map(|m| m.as_str()).unwrap_or_default().to_string()),
            }
        });

        Ok(rendered.into_owned())
    }
}

/// Build the grounded prompt from retrieved documents and a question
///
/// Documents are joined with a blank line in retrieval order.
pub fn render_rag_prompt<S: AsRef<str>>(documents: &[S], question: &str) -> String {
    let context = documents
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("\n\n");

    let values = HashMap::from([("context", context.as_str()), ("input", question)]);

    // Both variables are always supplied.
    PromptTemplate::rag()
        .render(&values)
        .unwrap_or_default()
}
