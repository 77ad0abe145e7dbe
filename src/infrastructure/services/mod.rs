//! Infrastructure services

mod answer_service;
mod client_factory;
mod ingestion_service;
mod session_service;

pub use answer_service::{AnswerService, AnswerSettings, GroundedAnswer};
pub use client_factory::{ClientFactory, ProviderClientFactory};
pub use ingestion_service::{IngestOutcome, IngestionService};
pub use session_service::{
    ConfigureSessionRequest, SessionHealth, SessionService, SessionStatus,
};

#[cfg(test)]
pub use client_factory::mock::MockClientFactory;
