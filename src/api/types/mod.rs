//! API request, response and error types

pub mod error;
pub mod json;
pub mod session;

pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
pub use session::{
    ChatRequest, ConfigureSessionBody, IngestRequest, IngestResponse, MessageResponse,
    MessagesResponse, SelectContextRequest, SessionResponse,
};
