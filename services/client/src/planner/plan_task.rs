//! services/client/src/planner/plan_task.rs
//!
//! Owns the "generate itinerary" lifecycle: Idle -> Pending -> Succeeded | Failed,
//! and back to Pending on every resubmission.
//!
//! Every submission takes the next request id. Only the request whose id is
//! still the pending one may publish its outcome; anything else resolving later
//! is stale and dropped without touching the state.

use crate::planner::state::{CurrentPlan, GenerationState, PlanHandle};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use travel_planner_core::{
    ports::{PlanGenerationService, PortError},
    Itinerary, TripPreferences,
};

/// Why a submission did not produce the current itinerary.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// A later submission replaced this one before it resolved.
    #[error("A newer plan request replaced this one")]
    Superseded,

    #[error("Plan request failed: {0}")]
    Request(#[from] PortError),
}

/// Puts the state back to Idle if a submission is dropped while its request is
/// still the pending one.
struct PendingRequest<'a> {
    state: &'a watch::Sender<GenerationState>,
    request_id: u64,
}

impl Drop for PendingRequest<'_> {
    fn drop(&mut self) {
        let request_id = self.request_id;
        let abandoned = self.state.send_if_modified(|state| {
            if !matches!(state, GenerationState::Pending { request_id: id } if *id == request_id) {
                return false;
            }
            *state = GenerationState::Idle;
            true
        });
        if abandoned {
            debug!(request_id, "Plan request dropped before it resolved.");
        }
    }
}

pub struct PlanRequestController {
    generator: Arc<dyn PlanGenerationService>,
    state: watch::Sender<GenerationState>,
    last_request_id: AtomicU64,
}

impl PlanRequestController {
    pub fn new(generator: Arc<dyn PlanGenerationService>) -> Self {
        let (state, _) = watch::channel(GenerationState::Idle);
        Self {
            generator,
            state,
            last_request_id: AtomicU64::new(0),
        }
    }

    /// A read-only subscription to the generation state.
    pub fn handle(&self) -> PlanHandle {
        PlanHandle::new(self.state.subscribe())
    }

    pub fn state(&self) -> GenerationState {
        self.state.borrow().clone()
    }

    pub fn current_itinerary(&self) -> Option<Arc<Itinerary>> {
        self.state.borrow().current().map(|plan| plan.itinerary.clone())
    }

    /// Requests a new itinerary, superseding any request still in flight.
    ///
    /// The previous itinerary is cleared as soon as the request starts. Failures are
    /// recorded in the state and returned; they never escape as panics. Dropping the
    /// future while its request is still the pending one puts the state back to Idle.
    pub async fn submit(&self, preferences: TripPreferences) -> Result<Arc<Itinerary>, PlanError> {
        let mut request_id = 0;
        self.state.send_modify(|state| {
            request_id = self.last_request_id.fetch_add(1, Ordering::SeqCst) + 1;
            *state = GenerationState::Pending { request_id };
        });
        let _pending = PendingRequest {
            state: &self.state,
            request_id,
        };
        info!(
            request_id,
            "Plan request started for: {}", preferences.destination
        );

        let outcome = self.generator.generate_plan(&preferences).await;

        let mut result = Err(PlanError::Superseded);
        self.state.send_if_modified(|state| {
            let still_latest =
                matches!(state, GenerationState::Pending { request_id: id } if *id == request_id);
            if !still_latest {
                return false;
            }

            *state = match outcome {
                Ok(itinerary) => {
                    let itinerary = Arc::new(itinerary);
                    result = Ok(itinerary.clone());
                    GenerationState::Succeeded(CurrentPlan {
                        epoch: request_id,
                        itinerary,
                    })
                }
                Err(error) => {
                    result = Err(PlanError::Request(error.clone()));
                    GenerationState::Failed { request_id, error }
                }
            };
            true
        });

        match &result {
            Ok(itinerary) => info!(
                request_id,
                "Plan ready: {} with {} days",
                itinerary.destination(),
                itinerary.days().len()
            ),
            Err(PlanError::Superseded) => {
                debug!(request_id, "Discarding stale plan response.")
            }
            Err(PlanError::Request(error)) => warn!(request_id, "Plan request failed: {}", error),
        }
        result
    }
}
