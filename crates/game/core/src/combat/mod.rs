//! Pure combat resolution.
//!
//! [`resolve`] computes the outcome of a skill or item from the acting and
//! target units plus a [`ModifierContext`]. It never touches match state;
//! the engine applies the returned [`ResolutionResult`] to both units in
//! one step. Given the same inputs and the same [`Rolls`] seed the output
//! is identical.
mod damage;
mod hit;
mod modifiers;
mod result;

pub use damage::{apply_resistance, calculate_damage, reflected_damage};
pub use hit::{roll_crit, roll_dodge};
pub use modifiers::{Modifier, ModifierContext, ModifierSource, MultiplierStack};
pub use result::{ResolutionResult, StatusApplication};

use crate::env::{RngOracle, Rolls};
use crate::state::{
    EffectTarget, ItemInstance, ItemKind, SkillDefinition, SkillTags, StatusKind, UnitState,
    UtilityKind,
};

/// What the acting side used.
#[derive(Clone, Copy, Debug)]
pub enum ActionSource<'a> {
    Skill(&'a SkillDefinition),
    Item(&'a ItemInstance),
}

impl ActionSource<'_> {
    /// Sources that target the opponent can be dodged.
    pub fn is_offensive(&self) -> bool {
        match self {
            ActionSource::Skill(skill) => skill.is_offensive(),
            ActionSource::Item(item) => item.kind.is_offensive(),
        }
    }

    pub fn power(&self) -> u32 {
        match self {
            ActionSource::Skill(skill) => skill.power,
            ActionSource::Item(_) => 0,
        }
    }
}

/// Resolves one skill or item use.
pub fn resolve<R: RngOracle + ?Sized>(
    source: ActionSource<'_>,
    actor: &UnitState,
    target: &UnitState,
    ctx: &ModifierContext,
    rolls: &mut Rolls<'_, R>,
) -> ResolutionResult {
    if source.is_offensive() && roll_dodge(rolls, target.def.dodge_chance()) {
        return ResolutionResult::dodged();
    }

    let power = source.power();
    let magical = match source {
        ActionSource::Skill(skill) => {
            skill.tags.contains(SkillTags::MAGICAL) || actor.def.element.is_magic()
        }
        ActionSource::Item(_) => false,
    };

    let (damage, crit) = if power > 0 {
        let crit = roll_crit(rolls, ctx.crit_chance);
        let damage = calculate_damage(
            power,
            actor.effective_attack(),
            target.effective_defense(),
            ctx,
        );
        (
            apply_resistance(damage, target.def.magic_resistance(), magical),
            crit,
        )
    } else {
        (0, false)
    };
    let reflected = reflected_damage(damage, target.def.reflect_fraction());

    let statuses_applied = match source {
        ActionSource::Skill(skill) => skill
            .effects
            .iter()
            .filter(|effect| rolls.chance(effect.chance))
            .map(|effect| StatusApplication {
                target: effect.target,
                kind: effect.kind,
                value: effect.value,
                duration: effect.duration,
            })
            .collect(),
        ActionSource::Item(item) => vec![item_effect(item)],
    };

    ResolutionResult {
        damage,
        reflected,
        statuses_applied,
        crit,
        dodged: false,
        magical,
    }
}

fn item_effect(item: &ItemInstance) -> StatusApplication {
    let (target, kind, duration) = match item.kind {
        ItemKind::Heal => (EffectTarget::Caster, StatusKind::Heal, 0),
        ItemKind::Buff { status, duration } => (EffectTarget::Caster, status, duration),
        ItemKind::Debuff { status, duration } => (EffectTarget::Opponent, status, duration),
        ItemKind::Utility(UtilityKind::Shield) => (EffectTarget::Caster, StatusKind::Shield, 0),
        ItemKind::Utility(UtilityKind::Energize) => {
            (EffectTarget::Caster, StatusKind::Energize, 0)
        }
        ItemKind::Utility(UtilityKind::Cleanse) => (EffectTarget::Caster, StatusKind::Cleanse, 0),
    };
    StatusApplication {
        target,
        kind,
        value: item.value,
        duration,
    }
}
