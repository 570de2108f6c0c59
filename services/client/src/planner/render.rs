//! services/client/src/planner/render.rs
//!
//! Plain-text rendering of itineraries and transcripts for the terminal.

use std::fmt::Write;
use travel_planner_core::{ConversationTurn, Itinerary, Role};

/// Renders the itinerary with its days in travel order.
pub fn render_itinerary(plan: &Itinerary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Destynacja: {}", plan.destination());
    if !plan.summary().is_empty() {
        let _ = writeln!(out, "Podsumowanie: {}", plan.summary());
    }
    for day in plan.days() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Dzień {} - {}", day.day, day.theme);
        for activity in &day.activities {
            let _ = writeln!(out, "  * {}", activity);
        }
    }
    out
}

pub fn render_turn(turn: &ConversationTurn) -> String {
    let speaker = match turn.role {
        Role::User => "Ty",
        Role::Assistant => "Bot",
    };
    format!("{}: {}", speaker, turn.content)
}
