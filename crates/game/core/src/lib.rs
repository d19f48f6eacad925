//! Deterministic battle rules shared by every match participant.
//!
//! `battle-core` defines the canonical match state, the phase/turn state
//! machine, the action validator and resolver, and the pure combat
//! resolution pipeline. All state mutation flows through
//! [`engine::BattleEngine`]; the runtime crate only clones, publishes and
//! queries what the engine produces.
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;

pub use action::{ActionError, ActionKind, PlayerAction, available_actions, validate_action};
pub use combat::{
    ActionSource, ModifierContext, ModifierSource, ResolutionResult, StatusApplication, resolve,
};
pub use config::BattleConfig;
pub use engine::{BattleEngine, Submission, SubmitError};
pub use env::{PcgRng, RngOracle, Rolls, compute_seed};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    ComboDefinition, Controller, Difficulty, EffectDescriptor, EffectTarget, Element,
    EventFlags, EventLogEntry, ItemId, ItemInstance, ItemKind, ItemUses, LoggedAction,
    MatchId, MatchOutcome, MatchRules, MatchSetup, MatchState, MatchVersion, OutcomeReason,
    PassiveKind, Phase, Region, ResolvedResult, RosterError, Season, SideId, SideSetup,
    SideState, SkillDefinition, SkillId, SkillTags, StatusEffect, StatusEffects, StatusKind,
    Switch, TurnState, UnitDefinition, UnitId, UnitState, UnitTags, UtilityKind,
};
