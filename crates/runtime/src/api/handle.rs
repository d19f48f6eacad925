//! Cloneable façade for issuing commands to one match worker.
//!
//! [`MatchHandle`] hides channel plumbing and offers async helpers for
//! submitting versioned actions, reading snapshots and following the match
//! through the event bus.
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{broadcast, mpsc, oneshot};

use battle_core::{
    EventLogEntry, GameError, MatchId, MatchState, MatchVersion, PlayerAction, SideId,
};

use super::errors::{ErrorKind, Result, RuntimeError};
use crate::events::{EventBus, MatchEvent};
use crate::workers::Command;

/// Successful submission: the new canonical state and what it produced.
#[derive(Clone, Debug)]
pub struct Accepted {
    pub version: MatchVersion,
    pub state: Arc<MatchState>,
    pub events: Vec<EventLogEntry>,
}

/// Rejection carried by a [`SubmissionResponse`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub kind: ErrorKind,
    pub code: &'static str,
    pub reason: String,
}

impl From<&RuntimeError> for Rejection {
    fn from(err: &RuntimeError) -> Self {
        Self {
            kind: err.kind(),
            code: err.error_code(),
            reason: err.to_string(),
        }
    }
}

/// Wire shape of a submission outcome.
#[derive(Clone, Debug, Serialize)]
pub struct SubmissionResponse {
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<MatchVersion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_state: Option<Arc<MatchState>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<EventLogEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Rejection>,
}

impl SubmissionResponse {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl From<Result<Accepted>> for SubmissionResponse {
    fn from(result: Result<Accepted>) -> Self {
        match result {
            Ok(accepted) => Self {
                accepted: true,
                version: Some(accepted.version),
                new_state: Some(accepted.state),
                events: Some(accepted.events),
                error: None,
            },
            Err(err) => Self {
                accepted: false,
                version: None,
                new_state: None,
                events: None,
                error: Some(Rejection::from(&err)),
            },
        }
    }
}

/// Client-facing handle to a running match.
#[derive(Clone, Debug)]
pub struct MatchHandle {
    match_id: MatchId,
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl MatchHandle {
    pub(crate) fn new(match_id: MatchId, command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            match_id,
            command_tx,
            event_bus,
        }
    }

    pub fn match_id(&self) -> MatchId {
        self.match_id
    }

    /// Submit an action against `expected`.
    ///
    /// Fails with [`RuntimeError::StaleSubmission`] when the canonical
    /// version has moved on; the state is untouched in that case.
    pub async fn submit(&self, expected: MatchVersion, action: PlayerAction) -> Result<Accepted> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.send(Command::Submit {
            expected,
            action,
            reply: reply_tx,
        })
        .await?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Like [`submit`](Self::submit) but folds the outcome into the
    /// `{accepted, newState?, events?, error?}` response shape.
    pub async fn respond(&self, expected: MatchVersion, action: PlayerAction) -> SubmissionResponse {
        self.submit(expected, action).await.into()
    }

    /// Read-only snapshot of the canonical state.
    pub async fn snapshot(&self) -> Result<Arc<MatchState>> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.send(Command::Snapshot { reply: reply_tx }).await?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    pub async fn version(&self) -> Result<MatchVersion> {
        Ok(self.snapshot().await?.version())
    }

    /// Concede on behalf of `side`. Cancels any scheduled bot decision.
    pub async fn forfeit(&self, side: SideId) -> Result<Accepted> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.send(Command::Forfeit {
            side,
            reply: reply_tx,
        })
        .await?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// End the current turn without an owner check (idle watchdog).
    pub async fn force_end_turn(&self) -> Result<Accepted> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.send(Command::ForceEndTurn { reply: reply_tx }).await?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Subscribe to updates of this match.
    ///
    /// Every accepted submission yields one [`MatchEvent::Update`]; a
    /// terminal match additionally yields exactly one
    /// [`MatchEvent::Ended`].
    pub fn subscribe(&self) -> Option<broadcast::Receiver<MatchEvent>> {
        self.event_bus.subscribe(self.match_id)
    }

    pub(crate) async fn shutdown(&self) -> Result<()> {
        self.send(Command::Shutdown).await
    }

    async fn send(&self, command: Command) -> Result<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)
    }
}
