pub mod common;
pub mod item;
pub mod side;
pub mod skill;
pub mod status;
pub mod turn;
pub mod unit;

pub use common::{ItemId, MatchId, MatchVersion, SideId, SkillId, UnitId};
pub use item::{ItemInstance, ItemKind, ItemUses, UtilityKind};
pub use side::{Controller, Difficulty, SideState};
pub use skill::{EffectDescriptor, EffectTarget, SkillDefinition, SkillTags};
pub use status::{StatusEffect, StatusEffects, StatusKind};
pub use turn::{Phase, TurnState};
pub use unit::{
    Cooldown, Element, PassiveKind, Region, Season, UnitDefinition, UnitState, UnitTags,
};
