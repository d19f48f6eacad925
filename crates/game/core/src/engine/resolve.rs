//! Application of accepted actions to the match.
//!
//! Every function here runs after validation succeeded, so it only mutates.
//! Lookups that validation already guaranteed still return errors instead of
//! panicking.

use std::sync::Arc;

use crate::action::{ActionError, ActionKind};
use crate::combat::{ActionSource, ModifierContext, resolve};
use crate::env::{RngOracle, Rolls};
use crate::state::{ItemId, MatchState, ResolvedResult, SideId, SkillId, Switch, UnitId};

/// Applies one action for `acting`. Returns the partial result and the skill
/// used, if any.
pub(super) fn apply_action(
    state: &mut MatchState,
    oracle: &dyn RngOracle,
    acting: SideId,
    kind: ActionKind,
) -> Result<(ResolvedResult, Option<SkillId>), ActionError> {
    let mut result = ResolvedResult::default();
    let used_skill = match kind {
        ActionKind::UseSkill { skill } => {
            use_skill(state, oracle, acting, skill, &mut result)?;
            Some(skill)
        }
        ActionKind::UseItem { item } => {
            use_item(state, oracle, acting, item, &mut result)?;
            None
        }
        ActionKind::SwitchActive { unit } => {
            let switch = switch_active(state, acting, unit)?;
            result.summary = format!("{} switched {} out for {}", acting, switch.outgoing, switch.incoming);
            result.switched = Some(switch);
            None
        }
        ActionKind::EndTurn => {
            result.summary = format!("{} passed", acting);
            None
        }
    };
    Ok((result, used_skill))
}

fn use_skill(
    state: &mut MatchState,
    oracle: &dyn RngOracle,
    acting: SideId,
    skill_id: SkillId,
    result: &mut ResolvedResult,
) -> Result<(), ActionError> {
    let def = Arc::clone(&state.side(acting).active_unit().def);
    let skill = def
        .skill(skill_id)
        .ok_or(ActionError::SkillNotFound { skill: skill_id })?;

    let ctx = ModifierContext::from_match(state, acting);
    let mut rolls = Rolls::new(oracle, state.seed, state.nonce(), acting.index() as u32);
    let resolution = {
        let actor = state.side(acting).active_unit();
        let target = state.side(acting.opponent()).active_unit();
        resolve(ActionSource::Skill(skill), actor, target, &ctx, &mut rolls)
    };

    let rules = Arc::clone(&state.rules);
    let (own, other) = state.sides_mut(acting);
    let actor = own.active_unit_mut();
    actor.resource -= skill.resource_cost.min(actor.resource);
    actor.set_cooldown(skill.id, skill.cooldown);
    let target = other.active_unit_mut();
    let target_name = target.def.name.clone();
    let (actor_alive, target_alive) = (actor.is_alive(), target.is_alive());
    resolution.apply(actor, target, &rules.config);

    collect_fainted(result, actor_alive && !actor.is_alive(), actor.id());
    collect_fainted(result, target_alive && !target.is_alive(), target.id());

    result.summary = if resolution.dodged {
        format!("{} dodged {}", target_name, skill.name)
    } else {
        let mut summary = format!("{} used {} on {}", def.name, skill.name, target_name);
        if resolution.damage > 0 {
            summary.push_str(&format!(" for {} damage", resolution.damage));
        }
        if resolution.crit {
            summary.push_str(" (critical)");
        }
        if resolution.reflected > 0 {
            summary.push_str(&format!(", {} reflected", resolution.reflected));
        }
        summary
    };
    result.resolution = Some(resolution);
    Ok(())
}

fn use_item(
    state: &mut MatchState,
    oracle: &dyn RngOracle,
    acting: SideId,
    item_id: ItemId,
    result: &mut ResolvedResult,
) -> Result<(), ActionError> {
    let position = state
        .side(acting)
        .hand_position(item_id)
        .ok_or(ActionError::ItemNotInHand { item: item_id })?;
    let mut item = state.side(acting).hand[position].clone();

    let ctx = ModifierContext::from_match(state, acting);
    let mut rolls = Rolls::new(oracle, state.seed, state.nonce(), acting.index() as u32);
    let resolution = {
        let actor = state.side(acting).active_unit();
        let target = state.side(acting.opponent()).active_unit();
        resolve(ActionSource::Item(&item), actor, target, &ctx, &mut rolls)
    };

    let rules = Arc::clone(&state.rules);
    let (own, other) = state.sides_mut(acting);
    resolution.apply(own.active_unit_mut(), other.active_unit_mut(), &rules.config);

    own.hand.remove(position);
    result.summary = if resolution.dodged {
        format!("{} used {}, dodged", acting, item.name)
    } else {
        format!("{} used {}", acting, item.name)
    };
    if item.consume() {
        own.hand.insert(position, item);
    } else {
        own.discard.push(item);
    }
    result.resolution = Some(resolution);
    Ok(())
}

/// Swaps the active unit with bench unit `unit`.
pub(super) fn switch_active(
    state: &mut MatchState,
    acting: SideId,
    unit: UnitId,
) -> Result<Switch, ActionError> {
    let side = state.side_mut(acting);
    let position = side
        .bench_position(unit)
        .ok_or(ActionError::SwitchTargetNotOnBench { unit })?;
    let (outgoing, incoming) = side.swap_active(position);
    Ok(Switch {
        side: acting,
        outgoing,
        incoming,
    })
}

fn collect_fainted(result: &mut ResolvedResult, fainted: bool, unit: UnitId) {
    if fainted {
        result.fainted.push(unit);
    }
}
