//! Request and response bodies for the assistant endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{ChatMessage, ChatRole, ContextSelector};
use crate::infrastructure::markdown::render_markdown;
use crate::infrastructure::services::{ConfigureSessionRequest, IngestOutcome, SessionStatus};

/// `PUT /api/session`
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigureSessionBody {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub index_name: Option<String>,
    #[serde(default)]
    pub context: Option<ContextSelector>,
}

impl From<ConfigureSessionBody> for ConfigureSessionRequest {
    fn from(body: ConfigureSessionBody) -> Self {
        Self {
            api_key: body.api_key,
            index_name: body.index_name,
            context: body.context,
        }
    }
}

/// `PUT /api/session/context`
#[derive(Debug, Clone, Deserialize)]
pub struct SelectContextRequest {
    pub context: ContextSelector,
}

/// Session status as shown in the sidebar
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub ready: bool,
    pub index_name: String,
    pub context: ContextSelector,
    pub contexts: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    pub message_count: usize,
}

impl SessionResponse {
    /// `default_index_name` fills the field while unconfigured
    pub fn from_status(status: SessionStatus, default_index_name: &str) -> Self {
        Self {
            ready: status.ready,
            index_name: status
                .index_name
                .unwrap_or_else(|| default_index_name.to_string()),
            context: status.context,
            contexts: ContextSelector::labels(),
            warning: status.warning,
            message_count: status.message_count,
        }
    }
}

/// `POST /api/knowledge`
#[derive(Debug, Clone, Deserialize)]
pub struct IngestRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub context: Option<ContextSelector>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IngestResponse {
    Skipped,
    Stored {
        id: String,
        namespace: String,
        message: String,
    },
}

impl From<IngestOutcome> for IngestResponse {
    fn from(outcome: IngestOutcome) -> Self {
        let message = outcome.message();

        match outcome {
            IngestOutcome::Skipped => Self::Skipped,
            IngestOutcome::Stored { id, namespace } => Self::Stored {
                id,
                namespace,
                message: message.unwrap_or_default(),
            },
        }
    }
}

/// `POST /api/chat`
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub question: String,
    #[serde(default)]
    pub context: Option<ContextSelector>,
}

/// One transcript entry
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub role: ChatRole,
    pub content: String,
    /// Content rendered from Markdown, raw HTML escaped
    pub html: String,
    pub created_at: DateTime<Utc>,
}

impl From<&ChatMessage> for MessageResponse {
    fn from(message: &ChatMessage) -> Self {
        Self {
            role: message.role(),
            content: message.content().to_string(),
            html: render_markdown(message.content()),
            created_at: message.created_at(),
        }
    }
}

/// `GET /api/messages`
#[derive(Debug, Clone, Serialize)]
pub struct MessagesResponse {
    pub messages: Vec<MessageResponse>,
}

impl From<&[ChatMessage]> for MessagesResponse {
    fn from(messages: &[ChatMessage]) -> Self {
        Self {
            messages: messages.iter().map(MessageResponse::from).collect(),
        }
    }
}
