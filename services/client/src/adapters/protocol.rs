//! services/client/src/adapters/protocol.rs
//!
//! Defines the JSON message protocol between this client and the planner
//! service. Domain types stay free of serde; conversions live here.

use serde::{Deserialize, Serialize};
use travel_planner_core::{
    ConversationTurn, DayPlan, DuplicateDay, Itinerary, TripPreferences,
};

//=========================================================================================
// Messages Sent FROM the Client TO the Service
//=========================================================================================

/// Body of `POST /api/generate-plan`.
#[derive(Serialize, Debug)]
pub struct GeneratePlanRequest<'a> {
    pub destination: &'a str,
    pub budget: &'static str,
    pub recreation_type: &'static str,
    pub interests: &'a [String],
    pub date_range: &'a str,
    pub travelers_count: u32,
    pub diet: &'a str,
    pub additional_info: &'a str,
}

impl<'a> From<&'a TripPreferences> for GeneratePlanRequest<'a> {
    fn from(prefs: &'a TripPreferences) -> Self {
        Self {
            destination: &prefs.destination,
            budget: prefs.budget.label(),
            recreation_type: prefs.recreation_type.label(),
            interests: &prefs.interests,
            date_range: &prefs.date_range,
            travelers_count: prefs.travelers_count,
            diet: prefs.diet.as_deref().unwrap_or_default(),
            additional_info: prefs.additional_info.as_deref().unwrap_or_default(),
        }
    }
}

/// Body of `POST /api/chat`.
#[derive(Serialize, Debug)]
pub struct ChatRequest<'a> {
    pub plan: ItineraryPayload,
    pub history: Vec<TurnPayload<'a>>,
    pub question: &'a str,
}

/// Body of `POST /api/save-pdf`.
#[derive(Serialize, Debug)]
pub struct PdfRequest {
    pub plan: ItineraryPayload,
}

#[derive(Serialize, Debug)]
pub struct TurnPayload<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

impl<'a> From<&'a ConversationTurn> for TurnPayload<'a> {
    fn from(turn: &'a ConversationTurn) -> Self {
        Self {
            role: turn.role.as_str(),
            content: &turn.content,
        }
    }
}

//=========================================================================================
// Messages Sent FROM the Service TO the Client
//=========================================================================================

/// The itinerary as it travels over the wire, in both directions.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ItineraryPayload {
    pub destination: String,
    #[serde(default)]
    pub summary: String,
    pub itinerary: Vec<DayPayload>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DayPayload {
    pub day: u32,
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub activities: Vec<String>,
}

impl From<&Itinerary> for ItineraryPayload {
    fn from(plan: &Itinerary) -> Self {
        Self {
            destination: plan.destination().to_string(),
            summary: plan.summary().to_string(),
            itinerary: plan
                .days()
                .iter()
                .map(|d| DayPayload {
                    day: d.day,
                    theme: d.theme.clone(),
                    activities: d.activities.clone(),
                })
                .collect(),
        }
    }
}

impl TryFrom<ItineraryPayload> for Itinerary {
    type Error = DuplicateDay;

    fn try_from(payload: ItineraryPayload) -> Result<Self, Self::Error> {
        let days = payload
            .itinerary
            .into_iter()
            .map(|d| DayPlan {
                day: d.day,
                theme: d.theme,
                activities: d.activities,
            })
            .collect();
        Itinerary::new(payload.destination, payload.summary, days)
    }
}

/// Success body of `POST /api/chat`.
#[derive(Deserialize, Debug)]
pub struct ChatResponse {
    pub answer: String,
}

/// The error body FastAPI produces for `HTTPException`.
#[derive(Deserialize, Debug)]
pub struct ErrorResponse {
    pub detail: serde_json::Value,
}

impl ErrorResponse {
    /// The human readable part of `detail`, which may be a string or structured data.
    pub fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
