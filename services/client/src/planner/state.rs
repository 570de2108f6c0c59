//! services/client/src/planner/state.rs
//!
//! Defines the shared application state and the observable generation state
//! that the conversation and export components read the current plan from.

use crate::{
    adapters::{HttpChatAdapter, HttpPdfAdapter, HttpPlanAdapter, ServiceClient},
    config::Config,
    error::ClientError,
    planner::{
        chat_task::ConversationSession, export_task::ArtifactExporter,
        plan_task::PlanRequestController,
    },
};
use std::sync::Arc;
use tokio::sync::watch;
use travel_planner_core::{
    ports::{DocumentExportService, PlanChatService, PlanGenerationService, PortError},
    Itinerary,
};

//=========================================================================================
// GenerationState (Owned by the PlanRequestController)
//=========================================================================================

/// The itinerary currently on display, tagged with the request that produced it.
#[derive(Debug, Clone)]
pub struct CurrentPlan {
    /// Sequence number of the request that produced this itinerary. Unique per itinerary.
    pub epoch: u64,
    pub itinerary: Arc<Itinerary>,
}

/// Where the "generate itinerary" lifecycle currently stands.
#[derive(Debug, Clone, Default)]
pub enum GenerationState {
    #[default]
    Idle,
    Pending {
        request_id: u64,
    },
    Succeeded(CurrentPlan),
    Failed {
        request_id: u64,
        error: PortError,
    },
}

impl GenerationState {
    pub fn current(&self) -> Option<&CurrentPlan> {
        match self {
            GenerationState::Succeeded(plan) => Some(plan),
            _ => None,
        }
    }
}

/// A read-only view on the generation state. Cloning it creates another subscriber.
#[derive(Clone)]
pub struct PlanHandle {
    rx: watch::Receiver<GenerationState>,
}

impl PlanHandle {
    pub(crate) fn new(rx: watch::Receiver<GenerationState>) -> Self {
        Self { rx }
    }

    /// A snapshot of the whole state.
    pub fn state(&self) -> GenerationState {
        self.rx.borrow().clone()
    }

    pub fn current(&self) -> Option<CurrentPlan> {
        self.rx.borrow().current().cloned()
    }

    pub fn current_itinerary(&self) -> Option<Arc<Itinerary>> {
        self.current().map(|plan| plan.itinerary)
    }

    /// Waits for the next state change. Returns `false` once the controller is gone.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

//=========================================================================================
// AppState (Shared by the Terminal Driver)
//=========================================================================================

/// The components of one planning session, wired to the same current plan.
#[derive(Clone)]
pub struct AppState {
    pub planner: Arc<PlanRequestController>,
    pub conversation: Arc<ConversationSession>,
    pub exporter: Arc<ArtifactExporter>,
}

impl AppState {
    /// Wires the components around the given service ports.
    pub fn new(
        config: &Config,
        generator: Arc<dyn PlanGenerationService>,
        chat: Arc<dyn PlanChatService>,
        documents: Arc<dyn DocumentExportService>,
    ) -> Self {
        let planner = Arc::new(PlanRequestController::new(generator));
        let conversation = Arc::new(ConversationSession::new(chat, planner.handle()));
        let exporter = Arc::new(ArtifactExporter::new(
            documents,
            planner.handle(),
            config.export_dir.clone(),
            config.export_file_name.clone(),
        ));

        Self {
            planner,
            conversation,
            exporter,
        }
    }

    /// Wires the components to the HTTP planner service named in the configuration.
    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        let client = ServiceClient::new(config.api_url.clone(), config.request_timeout)?;

        Ok(Self::new(
            config,
            Arc::new(HttpPlanAdapter::new(client.clone())),
            Arc::new(HttpChatAdapter::new(client.clone())),
            Arc::new(HttpPdfAdapter::new(client)),
        ))
    }
}
