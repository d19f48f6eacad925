//! Resolution results and their application to units.

use crate::config::BattleConfig;
use crate::state::{EffectTarget, StatusKind, UnitState};

/// An effect that landed, relative to the acting unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusApplication {
    pub target: EffectTarget,
    pub kind: StatusKind,
    pub value: u32,
    pub duration: u32,
}

/// Outcome of one combat resolution.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolutionResult {
    /// Damage dealt to the target after resistances.
    pub damage: u32,
    /// Damage returned to the acting unit.
    pub reflected: u32,
    pub statuses_applied: Vec<StatusApplication>,
    pub crit: bool,
    pub dodged: bool,
    pub magical: bool,
}

impl ResolutionResult {
    pub fn dodged() -> Self {
        Self {
            dodged: true,
            ..Self::default()
        }
    }

    /// Applies the result to both units.
    ///
    /// Damage and reflection land first, then effects in roll order.
    /// Effects on a unit that fainted are dropped.
    pub fn apply(&self, actor: &mut UnitState, target: &mut UnitState, config: &BattleConfig) {
        target.take_damage(self.damage);
        actor.take_damage(self.reflected);

        for application in &self.statuses_applied {
            let unit = match application.target {
                EffectTarget::Opponent => &mut *target,
                EffectTarget::Caster => &mut *actor,
            };
            if !unit.is_alive() {
                continue;
            }
            match application.kind {
                StatusKind::Heal => {
                    unit.heal(application.value);
                }
                StatusKind::Shield => {
                    unit.shields = unit.shields.saturating_add(application.value);
                }
                StatusKind::Energize => {
                    unit.resource = unit
                        .resource
                        .saturating_add(application.value)
                        .min(config.max_resource);
                }
                StatusKind::Cleanse => unit.statuses.cleanse(),
                kind => unit
                    .statuses
                    .apply(kind, application.value, application.duration),
            }
        }
    }
}
