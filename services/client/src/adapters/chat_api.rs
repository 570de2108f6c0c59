//! services/client/src/adapters/chat_api.rs
//!
//! This module contains the adapter for asking follow-up questions about a plan.
//! It implements the `PlanChatService` port from the `core` crate.

use crate::adapters::{
    http::ServiceClient,
    protocol::{ChatRequest, ChatResponse, ItineraryPayload, TurnPayload},
};
use async_trait::async_trait;
use tracing::debug;
use travel_planner_core::{
    ports::{PlanChatService, PortResult},
    ConversationTurn, Itinerary,
};

pub const CHAT_PATH: &str = "/api/chat";

/// An adapter that implements `PlanChatService` over the planner's HTTP API.
#[derive(Clone)]
pub struct HttpChatAdapter {
    client: ServiceClient,
}

impl HttpChatAdapter {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PlanChatService for HttpChatAdapter {
    async fn ask_about_plan(
        &self,
        plan: &Itinerary,
        history: &[ConversationTurn],
        question: &str,
    ) -> PortResult<String> {
        debug!("Sending question with {} turns of history", history.len());

        let request = ChatRequest {
            plan: ItineraryPayload::from(plan),
            history: history.iter().map(TurnPayload::from).collect(),
            question,
        };
        let response = self.client.post_json(CHAT_PATH, &request).await?;
        let body: ChatResponse = self.client.read_json(response).await?;

        Ok(body.answer)
    }
}
