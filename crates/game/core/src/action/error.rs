//! Illegal-action reasons.
//!
//! Every rejection leaves the match untouched, so all of these are
//! recoverable: the caller may retry with a legal action.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{ItemId, Phase, SideId, SkillId, UnitId};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error("it is {owner}'s turn, not {side}'s")]
    NotTurnOwner { owner: SideId, side: SideId },

    #[error("no input is accepted during the {phase} phase")]
    WrongPhase { phase: Phase },

    #[error("active {unit} has no HP left")]
    UnitIncapacitated { unit: UnitId },

    #[error("active {unit} is stunned")]
    Stunned { unit: UnitId },

    #[error("{skill} does not belong to the active unit")]
    SkillNotFound { skill: SkillId },

    #[error("{skill} is on cooldown for {remaining} more turns")]
    OnCooldown { skill: SkillId, remaining: u32 },

    #[error("{skill} costs {required} resource, {available} available")]
    InsufficientResource {
        skill: SkillId,
        required: u32,
        available: u32,
    },

    #[error("{skill} unlocks at turn {unlock_turn}")]
    UltimateLocked { skill: SkillId, unlock_turn: u32 },

    #[error("{item} is not in hand")]
    ItemNotInHand { item: ItemId },

    #[error("{unit} is not on the bench")]
    SwitchTargetNotOnBench { unit: UnitId },

    #[error("{unit} has no HP left")]
    SwitchTargetFainted { unit: UnitId },
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SkillNotFound { .. }
            | Self::ItemNotInHand { .. }
            | Self::SwitchTargetNotOnBench { .. }
            | Self::SwitchTargetFainted { .. } => ErrorSeverity::Validation,
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotTurnOwner { .. } => "ACTION_NOT_TURN_OWNER",
            Self::WrongPhase { .. } => "ACTION_WRONG_PHASE",
            Self::UnitIncapacitated { .. } => "ACTION_UNIT_INCAPACITATED",
            Self::Stunned { .. } => "ACTION_STUNNED",
            Self::SkillNotFound { .. } => "ACTION_SKILL_NOT_FOUND",
            Self::OnCooldown { .. } => "ACTION_ON_COOLDOWN",
            Self::InsufficientResource { .. } => "ACTION_INSUFFICIENT_RESOURCE",
            Self::UltimateLocked { .. } => "ACTION_ULTIMATE_LOCKED",
            Self::ItemNotInHand { .. } => "ACTION_ITEM_NOT_IN_HAND",
            Self::SwitchTargetNotOnBench { .. } => "ACTION_SWITCH_NOT_ON_BENCH",
            Self::SwitchTargetFainted { .. } => "ACTION_SWITCH_FAINTED",
        }
    }
}
