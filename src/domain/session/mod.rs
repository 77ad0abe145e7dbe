//! Session domain - configuration gate and per-session state

mod settings;
mod state;

pub use settings::{ApiKey, SessionSettings};
pub use state::{
    AssistantClients, ReadySession, Session, SessionState, CONFIGURATION_REQUIRED_NOTICE,
};
