//! crates/travel_planner_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any transport or serialization format.

use std::collections::HashSet;
use std::fmt;

//=========================================================================================
// Trip Preferences
//=========================================================================================

/// The budget bracket a traveller picks on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Budget {
    Low,
    Medium,
    High,
}

impl Budget {
    pub const ALL: [Budget; 3] = [Budget::Low, Budget::Medium, Budget::High];

    /// The label shown on the form and understood by the planner service.
    pub fn label(self) -> &'static str {
        match self {
            Budget::Low => "Niski",
            Budget::Medium => "Średni",
            Budget::High => "Wysoki",
        }
    }

    /// Accepts either the form label or the English variant name, ignoring case.
    pub fn from_label(value: &str) -> Option<Self> {
        let value = value.trim().to_lowercase();
        match value.as_str() {
            "niski" | "low" => Some(Budget::Low),
            "średni" | "sredni" | "medium" => Some(Budget::Medium),
            "wysoki" | "high" => Some(Budget::High),
            _ => None,
        }
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The kind of trip. A closed set, mirroring the options on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecreationType {
    CultureAndTechnology,
    Relaxation,
    Sightseeing,
    Art,
    PopularPlaces,
}

impl RecreationType {
    pub const ALL: [RecreationType; 5] = [
        RecreationType::CultureAndTechnology,
        RecreationType::Relaxation,
        RecreationType::Sightseeing,
        RecreationType::Art,
        RecreationType::PopularPlaces,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RecreationType::CultureAndTechnology => "Kultura i Technologie",
            RecreationType::Relaxation => "Wypoczynek",
            RecreationType::Sightseeing => "Zwiedzanie",
            RecreationType::Art => "Sztuka",
            RecreationType::PopularPlaces => "Popularne miejsca",
        }
    }

    /// Accepts either the form label or the English variant name, ignoring case.
    pub fn from_label(value: &str) -> Option<Self> {
        let value = value.trim().to_lowercase();
        Self::ALL.into_iter().find(|kind| {
            kind.label().to_lowercase() == value || kind.variant_name().to_lowercase() == value
        })
    }

    fn variant_name(self) -> &'static str {
        match self {
            RecreationType::CultureAndTechnology => "CultureAndTechnology",
            RecreationType::Relaxation => "Relaxation",
            RecreationType::Sightseeing => "Sightseeing",
            RecreationType::Art => "Art",
            RecreationType::PopularPlaces => "PopularPlaces",
        }
    }
}

impl fmt::Display for RecreationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Normalized trip preferences, ready to be sent to the planner service.
///
/// Only ever built by [`crate::RawPreferences::collect`], so every instance
/// has a non-empty destination, a positive traveller count and no empty interests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripPreferences {
    pub destination: String,
    pub budget: Budget,
    pub recreation_type: RecreationType,
    pub interests: Vec<String>,
    pub date_range: String,
    pub travelers_count: u32,
    pub diet: Option<String>,
    pub additional_info: Option<String>,
}

//=========================================================================================
// Itinerary
//=========================================================================================

/// One day of a generated itinerary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayPlan {
    /// The day index, unique within its itinerary.
    pub day: u32,
    pub theme: String,
    pub activities: Vec<String>,
}

/// Raised when an itinerary would break its day-index uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Day {0} appears more than once in the itinerary")]
pub struct DuplicateDay(pub u32);

/// A generated multi-day trip plan.
///
/// Days are kept in the order the service returned them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Itinerary {
    destination: String,
    summary: String,
    days: Vec<DayPlan>,
}

impl Itinerary {
    pub fn new(
        destination: impl Into<String>,
        summary: impl Into<String>,
        days: Vec<DayPlan>,
    ) -> Result<Self, DuplicateDay> {
        let mut seen = HashSet::with_capacity(days.len());
        for day in &days {
            if !seen.insert(day.day) {
                return Err(DuplicateDay(day.day));
            }
        }
        Ok(Self {
            destination: destination.into(),
            summary: summary.into(),
            days,
        })
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn days(&self) -> &[DayPlan] {
        &self.days
    }
}

//=========================================================================================
// Conversation
//=========================================================================================

/// Who wrote a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A single entry of the transcript kept for one itinerary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}
