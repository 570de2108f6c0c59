//! services/client/src/planner/chat_task.rs
//!
//! This module contains the conversation held about the current itinerary.
//!
//! The transcript belongs to exactly one itinerary. Whenever the current plan
//! changes (a new one arrives, or the old one is cleared by a resubmission) the
//! transcript is thrown away before anything else touches the session.

use crate::planner::state::PlanHandle;
use std::sync::{Arc, Weak};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use travel_planner_core::{
    ports::{PlanChatService, PortError},
    ConversationTurn, Itinerary,
};
use uuid::Uuid;

/// Why a question did not get an answer into the transcript.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("The question is empty")]
    EmptyQuestion,

    #[error("There is no plan to ask about")]
    NoItinerary,

    /// Another question is still waiting for its answer.
    #[error("A question is already waiting for an answer")]
    Busy,

    /// The plan was replaced while the question was in flight; the answer was dropped.
    #[error("The plan changed before the answer arrived")]
    Superseded,

    /// The question stays in the transcript without an answer.
    #[error("Chat request failed: {0}")]
    Request(#[from] PortError),
}

/// Whether a question is currently outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatMode {
    Idle,
    Pending,
}

struct Scope {
    epoch: u64,
    itinerary: Arc<Itinerary>,
    conversation_id: Uuid,
}

/// Held by the `ask` awaiting its answer. Dropping that future releases it, so
/// a cancelled question cannot leave the session pending.
struct InFlight;

struct SessionInner {
    scope: Option<Scope>,
    transcript: Vec<ConversationTurn>,
    in_flight: Weak<InFlight>,
    input: String,
}

impl SessionInner {
    fn mode(&self) -> ChatMode {
        if self.in_flight.strong_count() > 0 {
            ChatMode::Pending
        } else {
            ChatMode::Idle
        }
    }
}

pub struct ConversationSession {
    chat: Arc<dyn PlanChatService>,
    plans: PlanHandle,
    inner: Mutex<SessionInner>,
}

impl ConversationSession {
    pub fn new(chat: Arc<dyn PlanChatService>, plans: PlanHandle) -> Self {
        Self {
            chat,
            plans,
            inner: Mutex::new(SessionInner {
                scope: None,
                transcript: Vec::new(),
                in_flight: Weak::new(),
                input: String::new(),
            }),
        }
    }

    /// Rebinds the session to the current plan, dropping the transcript if it changed.
    fn sync_scope(&self, inner: &mut SessionInner) {
        let current = self.plans.current();
        let current_epoch = current.as_ref().map(|plan| plan.epoch);
        if inner.scope.as_ref().map(|scope| scope.epoch) == current_epoch {
            return;
        }

        if let Some(old) = &inner.scope {
            info!(
                conversation_id = %old.conversation_id,
                "Plan changed, discarding {} turns.",
                inner.transcript.len()
            );
        }

        inner.transcript.clear();
        inner.input.clear();
        inner.in_flight = Weak::new();
        inner.scope = current.map(|plan| Scope {
            epoch: plan.epoch,
            itinerary: plan.itinerary,
            conversation_id: Uuid::new_v4(),
        });
    }

    /// Asks a question about the current plan.
    ///
    /// The question is appended to the transcript before the request goes out.
    /// On failure it stays there unanswered and the session is ready for the
    /// next question.
    pub async fn ask(&self, question: &str) -> Result<String, ChatError> {
        if question.trim().is_empty() {
            return Err(ChatError::EmptyQuestion);
        }

        let (epoch, itinerary, history, conversation_id, _in_flight) = {
            let mut inner = self.inner.lock().await;
            self.sync_scope(&mut inner);

            let scope = inner.scope.as_ref().ok_or(ChatError::NoItinerary)?;
            let epoch = scope.epoch;
            let itinerary = scope.itinerary.clone();
            let conversation_id = scope.conversation_id;

            if inner.mode() == ChatMode::Pending {
                debug!(%conversation_id, "Rejecting question while another is pending.");
                return Err(ChatError::Busy);
            }

            inner.transcript.push(ConversationTurn::user(question));
            let in_flight = Arc::new(InFlight);
            inner.in_flight = Arc::downgrade(&in_flight);
            (
                epoch,
                itinerary,
                inner.transcript.clone(),
                conversation_id,
                in_flight,
            )
        };
        info!(%conversation_id, "Question sent: '{}'", question);

        let reply = self
            .chat
            .ask_about_plan(&itinerary, &history, question)
            .await;

        let mut inner = self.inner.lock().await;
        self.sync_scope(&mut inner);
        if inner.scope.as_ref().map(|scope| scope.epoch) != Some(epoch) {
            debug!(%conversation_id, "Dropping answer for a plan that is no longer current.");
            return Err(ChatError::Superseded);
        }

        inner.in_flight = Weak::new();
        match reply {
            Ok(answer) => {
                inner.transcript.push(ConversationTurn::assistant(answer.clone()));
                inner.input.clear();
                info!(%conversation_id, "Answer received.");
                Ok(answer)
            }
            Err(error) => {
                warn!(%conversation_id, "Question left unanswered: {}", error);
                Err(ChatError::Request(error))
            }
        }
    }

    /// Replaces the draft question.
    pub async fn set_input(&self, text: impl Into<String>) {
        let mut inner = self.inner.lock().await;
        self.sync_scope(&mut inner);
        inner.input = text.into();
    }

    pub async fn input(&self) -> String {
        let mut inner = self.inner.lock().await;
        self.sync_scope(&mut inner);
        inner.input.clone()
    }

    /// Asks the draft question. The draft is cleared only once it is answered.
    pub async fn send_input(&self) -> Result<String, ChatError> {
        let question = self.input().await;
        self.ask(&question).await
    }

    /// The turns so far, oldest first.
    pub async fn transcript(&self) -> Vec<ConversationTurn> {
        let mut inner = self.inner.lock().await;
        self.sync_scope(&mut inner);
        inner.transcript.clone()
    }

    pub async fn mode(&self) -> ChatMode {
        let mut inner = self.inner.lock().await;
        self.sync_scope(&mut inner);
        inner.mode()
    }

    /// Identifies the current transcript in logs. `None` while there is no plan.
    pub async fn conversation_id(&self) -> Option<Uuid> {
        let mut inner = self.inner.lock().await;
        self.sync_scope(&mut inner);
        inner.scope.as_ref().map(|scope| scope.conversation_id)
    }
}
