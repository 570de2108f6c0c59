pub mod domain;
pub mod ports;
pub mod preferences;

pub use domain::{
    Budget, ConversationTurn, DayPlan, DuplicateDay, Itinerary, RecreationType, Role,
    TripPreferences,
};
pub use ports::{
    DocumentExportService, PlanChatService, PlanGenerationService, PortError, PortResult,
};
pub use preferences::{split_interests, RawPreferences, ValidationError};
