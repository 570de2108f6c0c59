//! services/client/src/lib.rs
//!
//! Client for the travel planner service: generates an itinerary from trip
//! preferences, holds a conversation about it and exports it as a document.

pub mod adapters;
pub mod config;
pub mod error;
pub mod planner;
