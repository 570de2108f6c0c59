pub mod chat_task;
pub mod export_task;
pub mod plan_task;
pub mod render;
pub mod state;

#[cfg(test)]
pub(crate) mod fakes;

pub use chat_task::{ChatError, ChatMode, ConversationSession};
pub use export_task::{ArtifactExporter, ExportError, SavedArtifact};
pub use plan_task::{PlanError, PlanRequestController};
pub use state::{AppState, CurrentPlan, GenerationState, PlanHandle};
