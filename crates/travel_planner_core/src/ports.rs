//! crates/travel_planner_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, keeping the
//! planner independent of how the remote generation service is reached.

use crate::domain::{ConversationTurn, Itinerary, TripPreferences};
use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    /// The request never got a response (connection refused, reset, DNS...).
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The service answered with a non-success status.
    #[error("Service responded with status {status}: {message}")]
    Service { status: u16, message: String },

    /// A success status whose body could not be understood.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait PlanGenerationService: Send + Sync {
    /// Generates a fresh itinerary for the given preferences.
    async fn generate_plan(&self, preferences: &TripPreferences) -> PortResult<Itinerary>;
}

#[async_trait]
pub trait PlanChatService: Send + Sync {
    /// Answers a question about `plan`. `history` already ends with the question itself.
    async fn ask_about_plan(
        &self,
        plan: &Itinerary,
        history: &[ConversationTurn],
        question: &str,
    ) -> PortResult<String>;
}

#[async_trait]
pub trait DocumentExportService: Send + Sync {
    /// Renders the itinerary into a downloadable document and returns its bytes.
    async fn export_document(&self, plan: &Itinerary) -> PortResult<Bytes>;
}
