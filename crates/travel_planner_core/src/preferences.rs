//! crates/travel_planner_core/src/preferences.rs
//!
//! Turns the raw text of the trip form into normalized `TripPreferences`.
//! Nothing here assumes the form already enforced its own required/min rules.

use crate::domain::{Budget, RecreationType, TripPreferences};

/// Reasons a form submission is refused before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Destination is required")]
    MissingDestination,
    #[error("Unknown budget: '{0}'")]
    UnknownBudget(String),
    #[error("Unknown recreation type: '{0}'")]
    UnknownRecreationType(String),
    #[error("Travelers count must be a positive integer, got '{0}'")]
    InvalidTravelersCount(String),
}

/// The trip form exactly as typed, one string per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawPreferences {
    pub destination: String,
    pub budget: String,
    pub recreation_type: String,
    /// Comma separated, e.g. `"sushi, gry planszowe"`.
    pub interests: String,
    pub date_range: String,
    pub travelers_count: String,
    pub diet: String,
    pub additional_info: String,
}

impl RawPreferences {
    /// Validates and normalizes the form into a request payload.
    pub fn collect(&self) -> Result<TripPreferences, ValidationError> {
        let destination = self.destination.trim();
        if destination.is_empty() {
            return Err(ValidationError::MissingDestination);
        }

        let budget = Budget::from_label(&self.budget)
            .ok_or_else(|| ValidationError::UnknownBudget(self.budget.clone()))?;

        let recreation_type = RecreationType::from_label(&self.recreation_type).ok_or_else(
            || ValidationError::UnknownRecreationType(self.recreation_type.clone()),
        )?;

        let travelers_count = parse_travelers_count(&self.travelers_count)?;

        Ok(TripPreferences {
            destination: destination.to_string(),
            budget,
            recreation_type,
            interests: split_interests(&self.interests),
            date_range: self.date_range.trim().to_string(),
            travelers_count,
            diet: non_empty(&self.diet),
            additional_info: non_empty(&self.additional_info),
        })
    }
}

/// Splits a comma separated list, trimming each tag and dropping empty ones.
pub fn split_interests(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_travelers_count(raw: &str) -> Result<u32, ValidationError> {
    match raw.trim().parse::<u32>() {
        Ok(count) if count >= 1 => Ok(count),
        _ => Err(ValidationError::InvalidTravelersCount(raw.to_string())),
    }
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
