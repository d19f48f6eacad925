//! Skill definitions and the effect descriptors they carry.

use bitflags::bitflags;

use super::{SkillId, StatusKind};

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct SkillTags: u8 {
        /// Counts as magical regardless of the caster's element.
        const MAGICAL = 1 << 0;
    }
}

/// Who an effect lands on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectTarget {
    #[default]
    Opponent,
    Caster,
}

/// One effect carried by a skill.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectDescriptor {
    pub kind: StatusKind,
    pub value: u32,
    /// Owner turns the status lasts. Ignored for instant kinds.
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration: u32,
    /// Trigger probability, rolled independently per effect.
    #[cfg_attr(feature = "serde", serde(default = "full_chance"))]
    pub chance: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target: EffectTarget,
}

#[cfg(feature = "serde")]
fn full_chance() -> f64 {
    1.0
}

impl EffectDescriptor {
    /// Always-triggering effect on the opponent.
    pub fn new(kind: StatusKind, value: u32, duration: u32) -> Self {
        Self {
            kind,
            value,
            duration,
            chance: 1.0,
            target: EffectTarget::Opponent,
        }
    }

    pub fn on_caster(mut self) -> Self {
        self.target = EffectTarget::Caster;
        self
    }

    pub fn with_chance(mut self, chance: f64) -> Self {
        self.chance = chance;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDefinition {
    pub id: SkillId,
    pub name: String,
    /// Base magnitude. Zero for pure-utility skills.
    pub power: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub resource_cost: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<EffectDescriptor>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_ultimate: bool,
    /// Ultimates cannot be used before this turn number.
    #[cfg_attr(feature = "serde", serde(default))]
    pub unlock_turn: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: SkillTags,
}

impl SkillDefinition {
    /// Plain damaging skill with no cost, cooldown or effects.
    pub fn strike(id: SkillId, name: impl Into<String>, power: u32) -> Self {
        Self {
            id,
            name: name.into(),
            power,
            resource_cost: 0,
            cooldown: 0,
            effects: Vec::new(),
            is_ultimate: false,
            unlock_turn: None,
            tags: SkillTags::empty(),
        }
    }

    /// Skills with power or any opponent-targeted effect are offensive and
    /// can be dodged.
    pub fn is_offensive(&self) -> bool {
        self.power > 0
            || self
                .effects
                .iter()
                .any(|e| e.target == EffectTarget::Opponent)
    }

    pub fn is_defensive(&self) -> bool {
        self.effects.iter().any(|e| e.kind.is_defensive())
    }

    pub fn has_buff_or_debuff(&self) -> bool {
        self.effects.iter().any(|e| !e.kind.is_instant())
    }
}
