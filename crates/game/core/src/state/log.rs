//! Append-only event log entries.
//!
//! Exactly one entry is appended per accepted submission (player action,
//! forfeit or forced end of turn). Entries are never mutated afterwards and
//! are the only thing external reward systems consume.

use crate::action::ActionKind;
use crate::combat::ResolutionResult;
use crate::state::{ItemId, MatchVersion, SideId, StatusKind, UnitId};

/// What caused a log entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoggedAction {
    Player(ActionKind),
    Forfeit,
    /// End of turn forced by an external watchdog.
    ForcedEndTurn,
}

impl LoggedAction {
    /// Stable action-type label.
    pub fn action_type(&self) -> &'static str {
        match self {
            LoggedAction::Player(kind) => kind.as_str(),
            LoggedAction::Forfeit => "forfeit",
            LoggedAction::ForcedEndTurn => "forced-end-turn",
        }
    }
}

/// A unit leaving or entering the active slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Switch {
    pub side: SideId,
    pub outgoing: UnitId,
    pub incoming: UnitId,
}

/// Periodic effects that fired on the acting unit at RESOLUTION.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickReport {
    pub unit: Option<UnitId>,
    pub damage: u32,
    pub healed: u32,
    pub expired: Vec<StatusKind>,
}

/// Everything that happened as a consequence of one logged action.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolvedResult {
    /// Combat outcome for skills and items.
    pub resolution: Option<ResolutionResult>,
    /// Voluntary switch or lead selection.
    pub switched: Option<Switch>,
    /// Units whose HP reached 0 during this action.
    pub fainted: Vec<UnitId>,
    /// Automatic replacements of fainted active units.
    pub promoted: Vec<Switch>,
    pub tick: TickReport,
    pub item_drawn: Option<ItemId>,
    pub winner: Option<SideId>,
    /// Human-readable narrative.
    pub summary: String,
}

impl ResolvedResult {
    pub fn damage(&self) -> u32 {
        self.resolution.as_ref().map(|r| r.damage).unwrap_or(0)
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventLogEntry {
    /// Position in the log, starting at 0.
    pub sequence: u64,
    pub turn: u32,
    /// Match version after the action was applied.
    pub version: MatchVersion,
    pub acting_side: SideId,
    pub action: LoggedAction,
    pub result: ResolvedResult,
}

impl EventLogEntry {
    pub fn action_type(&self) -> &'static str {
        self.action.action_type()
    }
}
