//! Match-keyed event bus implementation.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;
use tokio::sync::broadcast;

use battle_core::{EventLogEntry, MatchId, MatchState, MatchVersion, OutcomeReason, SideId};

/// New canonical state pushed after an accepted submission.
#[derive(Clone, Debug, Serialize)]
pub struct MatchUpdate {
    pub match_id: MatchId,
    pub version: MatchVersion,
    pub state: Arc<MatchState>,
    /// Log entries appended by the submission.
    pub events: Vec<EventLogEntry>,
}

/// Terminal summary, published once per match.
#[derive(Clone, Debug, Serialize)]
pub struct MatchSummary {
    pub match_id: MatchId,
    pub winner: SideId,
    pub reason: OutcomeReason,
    pub final_event_log: Vec<EventLogEntry>,
}

impl MatchSummary {
    /// Builds the summary of a terminal state, `None` while in progress.
    pub fn from_state(state: &MatchState) -> Option<Self> {
        let outcome = state.outcome?;
        Some(Self {
            match_id: state.id,
            winner: outcome.winner,
            reason: outcome.reason,
            final_event_log: state.event_log.clone(),
        })
    }
}

#[derive(Clone, Debug, Serialize)]
pub enum MatchEvent {
    Update(MatchUpdate),
    Ended(MatchSummary),
}

impl MatchEvent {
    pub fn match_id(&self) -> MatchId {
        match self {
            MatchEvent::Update(update) => update.match_id,
            MatchEvent::Ended(summary) => summary.match_id,
        }
    }
}

/// Narrow publishing interface used by match workers.
pub trait StatePublisher: Send + Sync {
    fn publish(&self, event: MatchEvent);
}

/// Match-keyed broadcast bus.
///
/// Each registered match owns one broadcast channel. Publishing is
/// best-effort: an event with no subscribers is dropped.
#[derive(Clone, Debug)]
pub struct EventBus {
    capacity: usize,
    channels: Arc<RwLock<HashMap<MatchId, broadcast::Sender<MatchEvent>>>>,
}

impl EventBus {
    /// Creates a new event bus with default capacity per match
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per match
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            channels: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Opens the channel for `match_id`. Re-registering keeps the existing
    /// channel and its subscribers.
    pub fn register(&self, match_id: MatchId) {
        let mut channels = self.channels.write().unwrap_or_else(PoisonError::into_inner);
        channels
            .entry(match_id)
            .or_insert_with(|| broadcast::channel(self.capacity).0);
    }

    /// Subscribe to one match. `None` if the match is not registered.
    pub fn subscribe(&self, match_id: MatchId) -> Option<broadcast::Receiver<MatchEvent>> {
        let channels = self.channels.read().unwrap_or_else(PoisonError::into_inner);
        channels.get(&match_id).map(broadcast::Sender::subscribe)
    }

    /// Drops the channel; open receivers observe `RecvError::Closed` once
    /// drained.
    pub fn close(&self, match_id: MatchId) {
        let mut channels = self.channels.write().unwrap_or_else(PoisonError::into_inner);
        channels.remove(&match_id);
    }

    pub fn subscriber_count(&self, match_id: MatchId) -> usize {
        let channels = self.channels.read().unwrap_or_else(PoisonError::into_inner);
        channels
            .get(&match_id)
            .map(broadcast::Sender::receiver_count)
            .unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl StatePublisher for EventBus {
    fn publish(&self, event: MatchEvent) {
        let match_id = event.match_id();
        let channels = self.channels.read().unwrap_or_else(PoisonError::into_inner);
        match channels.get(&match_id) {
            Some(tx) => {
                if tx.send(event).is_err() {
                    tracing::trace!("No subscribers for {}", match_id);
                }
            }
            None => tracing::debug!("Dropping event for unregistered {}", match_id),
        }
    }
}
