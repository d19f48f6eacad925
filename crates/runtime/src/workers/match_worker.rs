//! Match worker that owns the authoritative [`battle_core::MatchState`].
//!
//! Receives commands from [`MatchHandle`](crate::MatchHandle), applies them
//! through [`battle_core::BattleEngine`] on a copy of the canonical state,
//! and publishes accepted transitions to the [`EventBus`]. Commands are
//! processed one at a time, which makes the version check and the commit a
//! single step.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use battle_core::{
    BattleEngine, Controller, MatchState, MatchVersion, PlayerAction, SideId, Submission,
    SubmitError,
};

use crate::api::{Accepted, ActionProvider, Result, RuntimeError};
use crate::events::{EventBus, MatchEvent, MatchSummary, MatchUpdate, StatePublisher};
use crate::runtime::RuntimeConfig;

/// Commands that can be sent to a match worker
pub enum Command {
    /// Versioned action submission.
    Submit {
        expected: MatchVersion,
        action: PlayerAction,
        reply: oneshot::Sender<Result<Accepted>>,
    },
    /// Read the canonical state.
    Snapshot {
        reply: oneshot::Sender<Arc<MatchState>>,
    },
    Forfeit {
        side: SideId,
        reply: oneshot::Sender<Result<Accepted>>,
    },
    ForceEndTurn {
        reply: oneshot::Sender<Result<Accepted>>,
    },
    /// Stop the worker loop.
    Shutdown,
}

/// Background task that serializes all mutations of one match.
pub struct MatchWorker {
    state: Arc<MatchState>,
    command_rx: mpsc::Receiver<Command>,
    /// Handed to bot tasks so a pending decision never keeps the worker alive.
    command_tx: mpsc::WeakSender<Command>,
    event_bus: EventBus,
    bot_provider: Arc<dyn ActionProvider>,
    config: RuntimeConfig,
    pending_bot: Option<JoinHandle<()>>,
}

impl MatchWorker {
    pub fn new(
        state: MatchState,
        command_rx: mpsc::Receiver<Command>,
        command_tx: mpsc::WeakSender<Command>,
        event_bus: EventBus,
        bot_provider: Arc<dyn ActionProvider>,
        config: RuntimeConfig,
    ) -> Self {
        info!(
            target: "runtime::worker",
            match_id = %state.id,
            owner = %state.turn.owner,
            "match worker initialized",
        );

        Self {
            state: Arc::new(state),
            command_rx,
            command_tx,
            event_bus,
            bot_provider,
            config,
            pending_bot: None,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        self.schedule_bot();

        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    if !self.handle_command(cmd) {
                        break;
                    }
                }
                else => break,
            }
        }

        self.cancel_bot();
        info!(
            target: "runtime::worker",
            match_id = %self.state.id,
            version = %self.state.version(),
            "match worker stopped",
        );
    }

    /// Returns `false` when the worker should stop.
    fn handle_command(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::Submit {
                expected,
                action,
                reply,
            } => {
                let result = self.handle_submit(expected, &action);
                if reply.send(result).is_err() {
                    debug!(target: "runtime::worker", "Submit reply channel closed (caller dropped)");
                }
            }
            Command::Snapshot { reply } => {
                if reply.send(Arc::clone(&self.state)).is_err() {
                    debug!(target: "runtime::worker", "Snapshot reply channel closed (caller dropped)");
                }
            }
            Command::Forfeit { side, reply } => {
                let result = self.apply(|engine| engine.forfeit(side));
                if reply.send(result).is_err() {
                    debug!(target: "runtime::worker", "Forfeit reply channel closed (caller dropped)");
                }
            }
            Command::ForceEndTurn { reply } => {
                let result = self.apply(|engine| engine.force_end_turn());
                if reply.send(result).is_err() {
                    debug!(target: "runtime::worker", "ForceEndTurn reply channel closed (caller dropped)");
                }
            }
            Command::Shutdown => return false,
        }
        true
    }

    fn handle_submit(&mut self, expected: MatchVersion, action: &PlayerAction) -> Result<Accepted> {
        if self.state.is_terminal() {
            return Err(RuntimeError::MatchEnded {
                match_id: self.state.id,
            });
        }

        let current = self.state.version();
        if expected != current {
            debug!(
                target: "runtime::worker",
                match_id = %self.state.id,
                side = %action.side,
                %expected,
                %current,
                "stale submission",
            );
            return Err(RuntimeError::StaleSubmission { expected, current });
        }

        self.apply(|engine| engine.submit(action))
    }

    /// Runs `op` against a copy of the canonical state and commits the copy
    /// on success. Readers holding the previous `Arc` keep their version.
    fn apply<F>(&mut self, op: F) -> Result<Accepted>
    where
        F: FnOnce(&mut BattleEngine<'_>) -> std::result::Result<Submission, SubmitError>,
    {
        let mut next = MatchState::clone(&self.state);
        let submission = {
            let mut engine = BattleEngine::new(&mut next);
            op(&mut engine)?
        };
        Ok(self.commit(next, submission))
    }

    fn commit(&mut self, next: MatchState, submission: Submission) -> Accepted {
        let state = Arc::new(next);
        self.state = Arc::clone(&state);

        debug!(
            target: "runtime::worker",
            match_id = %state.id,
            version = %submission.version,
            events = submission.events.len(),
            "committed state",
        );

        self.event_bus.publish(MatchEvent::Update(MatchUpdate {
            match_id: state.id,
            version: submission.version,
            state: Arc::clone(&state),
            events: submission.events.clone(),
        }));

        if submission.terminal {
            self.cancel_bot();
            if let Some(summary) = MatchSummary::from_state(&state) {
                info!(
                    target: "runtime::worker",
                    match_id = %state.id,
                    winner = %summary.winner,
                    reason = ?summary.reason,
                    events = summary.final_event_log.len(),
                    "match ended",
                );
                self.event_bus.publish(MatchEvent::Ended(summary));
            }
        } else {
            self.schedule_bot();
        }

        Accepted {
            version: submission.version,
            state,
            events: submission.events,
        }
    }

    fn cancel_bot(&mut self) {
        if let Some(task) = self.pending_bot.take() {
            task.abort();
        }
    }

    /// Schedules the bot decision for the current turn owner, replacing any
    /// decision still pending for an older version.
    fn schedule_bot(&mut self) {
        self.cancel_bot();
        if self.state.is_terminal() {
            return;
        }

        let side = self.state.turn.owner;
        let Controller::Bot { difficulty } = self.state.side(side).controller else {
            return;
        };

        let delay = self.config.bot_delay(difficulty);
        let snapshot = Arc::clone(&self.state);
        let provider = Arc::clone(&self.bot_provider);
        let command_tx = self.command_tx.clone();

        debug!(
            target: "runtime::worker",
            match_id = %snapshot.id,
            %side,
            %difficulty,
            delay_ms = delay.as_millis() as u64,
            "scheduled bot decision",
        );

        self.pending_bot = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let expected = snapshot.version();
            let action = match provider.provide_action(side, &snapshot).await {
                Ok(action) => action,
                Err(err) => {
                    warn!(
                        target: "runtime::worker",
                        match_id = %snapshot.id,
                        %side,
                        error = %err,
                        "bot provider failed, ending turn",
                    );
                    PlayerAction::end_turn(side)
                }
            };

            match submit_as_bot(&command_tx, expected, action).await {
                Some(Err(RuntimeError::IllegalAction(err))) => {
                    warn!(
                        target: "runtime::worker",
                        match_id = %snapshot.id,
                        %side,
                        error = %err,
                        "bot chose an illegal action, ending turn",
                    );
                    let _ = submit_as_bot(&command_tx, expected, PlayerAction::end_turn(side)).await;
                }
                Some(Err(err)) => {
                    warn!(
                        target: "runtime::worker",
                        match_id = %snapshot.id,
                        %side,
                        error = %err,
                        "bot submission rejected",
                    );
                }
                Some(Ok(_)) | None => {}
            }
        }));
    }
}

/// Sends a bot submission through the worker's own queue so it takes the
/// same version check as external callers. `None` once the worker is gone.
async fn submit_as_bot(
    command_tx: &mpsc::WeakSender<Command>,
    expected: MatchVersion,
    action: PlayerAction,
) -> Option<Result<Accepted>> {
    let tx = command_tx.upgrade()?;
    let (reply_tx, reply_rx) = oneshot::channel();
    tx.send(Command::Submit {
        expected,
        action,
        reply: reply_tx,
    })
    .await
    .ok()?;
    drop(tx);
    reply_rx.await.ok()
}
