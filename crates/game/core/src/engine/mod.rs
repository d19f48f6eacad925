//! Phase/turn state machine and action resolver.
//!
//! The [`BattleEngine`] is the only code that mutates a [`MatchState`].
//! Each accepted submission runs the whole turn pipeline synchronously:
//!
//! ```text
//! INIT (lead selection or pass) → ACTION → RESOLUTION → END_TURN → next INIT
//! ```
//!
//! Validation always completes before the first mutation, so a rejected
//! submission leaves the state untouched and appends nothing to the log.
mod errors;
mod phase;
mod resolve;

pub use errors::SubmitError;

use tracing::{debug, info};

use crate::action::{ActionKind, PlayerAction, validate_action};
use crate::env::{PcgRng, RngOracle};
use crate::state::{
    EventLogEntry, LoggedAction, MatchOutcome, MatchState, MatchVersion, OutcomeReason, Phase,
    ResolvedResult, SideId, SkillId,
};

/// Outcome of an accepted submission.
#[derive(Clone, Debug, PartialEq)]
pub struct Submission {
    /// Match version after the submission.
    pub version: MatchVersion,
    /// Entries appended to the event log.
    pub events: Vec<EventLogEntry>,
    pub terminal: bool,
}

static DEFAULT_RNG: PcgRng = PcgRng;

/// Authoritative reducer for one [`MatchState`].
pub struct BattleEngine<'a> {
    state: &'a mut MatchState,
    rng: &'a dyn RngOracle,
}

impl<'a> BattleEngine<'a> {
    /// Creates an engine using the default PCG oracle.
    pub fn new(state: &'a mut MatchState) -> Self {
        Self {
            state,
            rng: &DEFAULT_RNG,
        }
    }

    /// Creates an engine with a custom RNG oracle.
    pub fn with_rng(state: &'a mut MatchState, rng: &'a dyn RngOracle) -> Self {
        Self { state, rng }
    }

    /// Validates and applies one player action.
    ///
    /// During a side's first INIT a `SwitchActive` is a lead selection: it
    /// is logged and moves the turn to ACTION without ending it. Any other
    /// action passes INIT and runs the full turn.
    pub fn submit(&mut self, action: &PlayerAction) -> Result<Submission, SubmitError> {
        self.ensure_running()?;
        if let Err(err) = validate_action(self.state, action) {
            debug!(
                target: "battle::engine",
                match_id = %self.state.id,
                side = %action.side,
                action = action.kind.as_str(),
                version = %self.state.version(),
                error = %err,
                "rejected action",
            );
            return Err(err.into());
        }

        let acting = action.side;
        let turn = self.state.turn.number;
        if self.state.turn.phase == Phase::Init {
            let lead_window = self.state.side(acting).lead_pending;
            if let (true, ActionKind::SwitchActive { unit }) = (lead_window, action.kind) {
                let switch = resolve::switch_active(self.state, acting, unit)?;
                phase::pass_init(self.state);
                let result = ResolvedResult {
                    summary: format!("{} leads with {}", acting, switch.incoming),
                    switched: Some(switch),
                    ..ResolvedResult::default()
                };
                return Ok(self.record(turn, acting, LoggedAction::Player(action.kind), result));
            }
            phase::pass_init(self.state);
        }

        let (mut result, used_skill) =
            resolve::apply_action(self.state, self.rng, acting, action.kind)?;
        self.finish_turn(acting, used_skill, &mut result);
        Ok(self.record(turn, acting, LoggedAction::Player(action.kind), result))
    }

    /// Ends the match with `side` conceding.
    pub fn forfeit(&mut self, side: SideId) -> Result<Submission, SubmitError> {
        self.ensure_running()?;
        let winner = side.opponent();
        self.state.outcome = Some(MatchOutcome {
            winner,
            reason: OutcomeReason::Forfeit,
        });
        self.state.turn.bump();
        let result = ResolvedResult {
            winner: Some(winner),
            summary: format!("{} forfeited", side),
            ..ResolvedResult::default()
        };
        let turn = self.state.turn.number;
        Ok(self.record(turn, side, LoggedAction::Forfeit, result))
    }

    /// Ends the current turn on behalf of its owner.
    ///
    /// Used by external idle watchdogs; no owner check is performed.
    pub fn force_end_turn(&mut self) -> Result<Submission, SubmitError> {
        self.ensure_running()?;
        let acting = self.state.turn.owner;
        let turn = self.state.turn.number;
        if self.state.turn.phase == Phase::Init {
            phase::pass_init(self.state);
        }
        let mut result = ResolvedResult {
            summary: format!("{}'s turn was ended", acting),
            ..ResolvedResult::default()
        };
        self.finish_turn(acting, None, &mut result);
        Ok(self.record(turn, acting, LoggedAction::ForcedEndTurn, result))
    }

    fn ensure_running(&self) -> Result<(), SubmitError> {
        if self.state.is_terminal() {
            return Err(SubmitError::MatchEnded {
                match_id: self.state.id,
            });
        }
        Ok(())
    }

    fn finish_turn(
        &mut self,
        acting: SideId,
        used_skill: Option<SkillId>,
        result: &mut ResolvedResult,
    ) {
        phase::resolution(self.state, acting, used_skill, result);
        if self.state.is_terminal() {
            info!(
                target: "battle::engine",
                match_id = %self.state.id,
                winner = ?self.state.winner(),
                turn = self.state.turn.number,
                "match ended by knockout",
            );
            return;
        }
        phase::end_turn(self.state, result);
    }

    fn record(
        &mut self,
        turn: u32,
        acting: SideId,
        action: LoggedAction,
        result: ResolvedResult,
    ) -> Submission {
        let entry = EventLogEntry {
            sequence: self.state.nonce(),
            turn,
            version: self.state.version(),
            acting_side: acting,
            action,
            result,
        };
        debug!(
            target: "battle::engine",
            match_id = %self.state.id,
            side = %acting,
            action = entry.action_type(),
            version = %entry.version,
            summary = %entry.result.summary,
            "applied action",
        );
        self.state.event_log.push(entry.clone());
        Submission {
            version: self.state.version(),
            events: vec![entry],
            terminal: self.state.is_terminal(),
        }
    }
}
