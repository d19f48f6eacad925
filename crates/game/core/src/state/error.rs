//! Roster materialization errors.
//!
//! Raised while turning a [`super::MatchSetup`] into a [`super::MatchState`].
//! Any of them aborts match creation; no partial match is ever built.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{ItemId, SideId, UnitId};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RosterError {
    /// A roster does not contain exactly the required number of units.
    #[error("{side} roster has {found} units (expected {expected})")]
    WrongRosterSize {
        side: SideId,
        expected: usize,
        found: usize,
    },

    /// The same unit identity appears twice in one roster.
    #[error("{side} roster contains {unit} more than once")]
    DuplicateUnit { side: SideId, unit: UnitId },

    /// A unit definition is unusable.
    #[error("{side} {unit} is invalid: {reason}")]
    InvalidUnit {
        side: SideId,
        unit: UnitId,
        reason: &'static str,
    },

    /// The same item identity appears twice in one item pool.
    #[error("{side} item pool contains {item} more than once")]
    DuplicateItem { side: SideId, item: ItemId },
}

impl GameError for RosterError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::WrongRosterSize { .. } => "ROSTER_WRONG_SIZE",
            Self::DuplicateUnit { .. } => "ROSTER_DUPLICATE_UNIT",
            Self::InvalidUnit { .. } => "ROSTER_INVALID_UNIT",
            Self::DuplicateItem { .. } => "ROSTER_DUPLICATE_ITEM",
        }
    }
}
