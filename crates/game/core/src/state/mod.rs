//! Authoritative match state representation.
//!
//! This module owns the data structures that describe a match: sides,
//! rosters, turn bookkeeping and the event log. Runtime layers clone or
//! query this state but mutate it exclusively through the engine.
mod error;
mod log;
mod setup;
pub mod types;

use std::sync::Arc;

pub use error::RosterError;
pub use log::{EventLogEntry, LoggedAction, ResolvedResult, Switch, TickReport};
pub use setup::{MatchSetup, SideSetup};
pub use types::{
    Controller, Cooldown, Difficulty, EffectDescriptor, EffectTarget, Element, ItemId,
    ItemInstance, ItemKind, ItemUses, MatchId, MatchVersion, PassiveKind, Phase, Region, Season,
    SideId, SideState, SkillDefinition, SkillId, SkillTags, StatusEffect, StatusEffects,
    StatusKind, TurnState, UnitDefinition, UnitId, UnitState, UnitTags, UtilityKind,
};

use crate::config::BattleConfig;

/// A predefined set of units that empowers its side while all are alive.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComboDefinition {
    pub name: String,
    pub members: Vec<UnitId>,
    pub attack_multiplier: f64,
    pub defense_multiplier: f64,
}

impl ComboDefinition {
    /// True when every member is on `side` with HP above 0.
    pub fn is_active(&self, side: &SideState) -> bool {
        !self.members.is_empty()
            && self.members.iter().all(|member| {
                side.field_units()
                    .any(|unit| unit.id() == *member && unit.is_alive())
            })
    }
}

/// Event flags that feed the modifier pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventFlags {
    #[cfg_attr(feature = "serde", serde(default))]
    pub lunar: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub season: Option<Season>,
}

/// Immutable rules fixed at match creation.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchRules {
    pub config: BattleConfig,
    pub combos: Vec<ComboDefinition>,
    pub events: EventFlags,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OutcomeReason {
    /// Every unit of the losing side reached 0 HP.
    Knockout,
    Forfeit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchOutcome {
    pub winner: SideId,
    pub reason: OutcomeReason,
}

/// Canonical snapshot of one match.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchState {
    pub id: MatchId,
    /// Set once at creation; combined with the log length for every roll.
    pub seed: u64,
    pub turn: TurnState,
    pub sides: [SideState; 2],
    pub rules: Arc<MatchRules>,
    pub event_log: Vec<EventLogEntry>,
    /// Present once the match is terminal.
    pub outcome: Option<MatchOutcome>,
}

impl MatchState {
    #[inline]
    pub fn version(&self) -> MatchVersion {
        self.turn.version()
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn winner(&self) -> Option<SideId> {
        self.outcome.map(|o| o.winner)
    }

    pub fn config(&self) -> &BattleConfig {
        &self.rules.config
    }

    #[inline]
    pub fn side(&self, id: SideId) -> &SideState {
        &self.sides[id.index()]
    }

    #[inline]
    pub fn side_mut(&mut self, id: SideId) -> &mut SideState {
        &mut self.sides[id.index()]
    }

    /// Mutable access to both sides, acting side first.
    pub fn sides_mut(&mut self, acting: SideId) -> (&mut SideState, &mut SideState) {
        let [a, b] = &mut self.sides;
        match acting {
            SideId::A => (a, b),
            SideId::B => (b, a),
        }
    }

    /// Nonce of the next logged action.
    pub fn nonce(&self) -> u64 {
        self.event_log.len() as u64
    }

    /// Canonical bincode encoding of the state.
    #[cfg(feature = "serde")]
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// SHA-256 digest of the canonical encoding.
    ///
    /// Two states with the same root are byte-for-byte identical.
    #[cfg(feature = "serde")]
    pub fn state_root(&self) -> [u8; 32] {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        if let Ok(bytes) = self.to_bytes() {
            hasher.update(&bytes);
        }
        hasher.finalize().into()
    }
}
