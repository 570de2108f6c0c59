//! services/client/src/adapters/plan_api.rs
//!
//! This module contains the adapter for the itinerary generation endpoint.
//! It implements the `PlanGenerationService` port from the `core` crate.

use crate::adapters::{
    http::ServiceClient,
    protocol::{GeneratePlanRequest, ItineraryPayload},
};
use async_trait::async_trait;
use tracing::info;
use travel_planner_core::{
    ports::{PlanGenerationService, PortError, PortResult},
    Itinerary, TripPreferences,
};

pub const GENERATE_PLAN_PATH: &str = "/api/generate-plan";

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `PlanGenerationService` over the planner's HTTP API.
#[derive(Clone)]
pub struct HttpPlanAdapter {
    client: ServiceClient,
}

impl HttpPlanAdapter {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }
}

//=========================================================================================
// `PlanGenerationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl PlanGenerationService for HttpPlanAdapter {
    async fn generate_plan(&self, preferences: &TripPreferences) -> PortResult<Itinerary> {
        info!("Requesting a plan for: {}", preferences.destination);

        let request = GeneratePlanRequest::from(preferences);
        let response = self.client.post_json(GENERATE_PLAN_PATH, &request).await?;
        let payload: ItineraryPayload = self.client.read_json(response).await?;

        Itinerary::try_from(payload).map_err(|e| PortError::Malformed(e.to_string()))
    }
}
