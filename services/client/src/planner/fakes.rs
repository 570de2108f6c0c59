//! Scripted service ports used by the planner unit tests.
//!
//! Every response is held behind a oneshot gate so a test decides exactly when,
//! and in which order, outstanding requests resolve.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;
use travel_planner_core::{
    ports::{DocumentExportService, PlanChatService, PlanGenerationService, PortError, PortResult},
    Budget, ConversationTurn, DayPlan, Itinerary, RecreationType, TripPreferences,
};

pub fn itinerary(destination: &str) -> Itinerary {
    Itinerary::new(
        destination,
        format!("Wyjazd do: {}", destination),
        vec![
            DayPlan {
                day: 1,
                theme: "Przyjazd".to_string(),
                activities: vec!["Spacer".to_string()],
            },
            DayPlan {
                day: 2,
                theme: "Zwiedzanie".to_string(),
                activities: vec!["Muzeum".to_string(), "Kolacja".to_string()],
            },
        ],
    )
    .unwrap()
}

pub fn preferences(destination: &str) -> TripPreferences {
    TripPreferences {
        destination: destination.to_string(),
        budget: Budget::Medium,
        recreation_type: RecreationType::Sightseeing,
        interests: vec!["sushi".to_string()],
        date_range: "10-12 październik".to_string(),
        travelers_count: 2,
        diet: None,
        additional_info: None,
    }
}

fn dropped_gate() -> PortError {
    PortError::Network("gate dropped".to_string())
}

//=========================================================================================
// Plan generation
//=========================================================================================

/// Answers each plan request once the gate opened for its destination resolves.
#[derive(Default)]
pub struct GatedGenerator {
    gates: Mutex<HashMap<String, oneshot::Receiver<PortResult<Itinerary>>>>,
}

impl GatedGenerator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn gate(&self, destination: &str) -> oneshot::Sender<PortResult<Itinerary>> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(destination.to_string(), rx);
        tx
    }
}

#[async_trait]
impl PlanGenerationService for GatedGenerator {
    async fn generate_plan(&self, preferences: &TripPreferences) -> PortResult<Itinerary> {
        let gate = self
            .gates
            .lock()
            .unwrap()
            .remove(&preferences.destination)
            .expect("no gate opened for destination");
        gate.await.unwrap_or_else(|_| Err(dropped_gate()))
    }
}

//=========================================================================================
// Chat
//=========================================================================================

/// A question as the chat port received it.
#[derive(Debug, Clone)]
pub struct RecordedQuestion {
    pub destination: String,
    pub history: Vec<ConversationTurn>,
    pub question: String,
}

/// Answers questions in the order they were asked, each behind its own gate.
#[derive(Default)]
pub struct GatedChat {
    gates: Mutex<VecDeque<oneshot::Receiver<PortResult<String>>>>,
    pub received: Mutex<Vec<RecordedQuestion>>,
}

impl GatedChat {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn gate(&self) -> oneshot::Sender<PortResult<String>> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().push_back(rx);
        tx
    }

    /// Queues an answer that is available immediately.
    pub fn answer(&self, answer: &str) {
        let _ = self.gate().send(Ok(answer.to_string()));
    }

    /// Queues an immediate failure.
    pub fn fail(&self, error: PortError) {
        let _ = self.gate().send(Err(error));
    }

    pub fn received(&self) -> Vec<RecordedQuestion> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlanChatService for GatedChat {
    async fn ask_about_plan(
        &self,
        plan: &Itinerary,
        history: &[ConversationTurn],
        question: &str,
    ) -> PortResult<String> {
        self.received.lock().unwrap().push(RecordedQuestion {
            destination: plan.destination().to_string(),
            history: history.to_vec(),
            question: question.to_string(),
        });
        let gate = self
            .gates
            .lock()
            .unwrap()
            .pop_front()
            .expect("no answer queued");
        gate.await.unwrap_or_else(|_| Err(dropped_gate()))
    }
}

//=========================================================================================
// Export
//=========================================================================================

/// Returns the same export result every time and counts the calls.
pub struct FixedDocument {
    result: PortResult<Bytes>,
    pub calls: AtomicUsize,
}

impl FixedDocument {
    pub fn ok(bytes: &'static [u8]) -> Arc<Self> {
        Arc::new(Self {
            result: Ok(Bytes::from_static(bytes)),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(error: PortError) -> Arc<Self> {
        Arc::new(Self {
            result: Err(error),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentExportService for FixedDocument {
    async fn export_document(&self, _plan: &Itinerary) -> PortResult<Bytes> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}
