//! Legality checks for submitted actions.
//!
//! Checks short-circuit in a fixed order: turn owner, phase, then the
//! action-specific rules. The decision engine reuses these predicates, so
//! anything it proposes is accepted by the resolver.

use super::{ActionError, ActionKind, PlayerAction};
use crate::state::{ItemId, MatchState, Phase, SideState, SkillId, StatusKind, UnitId};

/// Validates `action` against the current state without mutating it.
///
/// `Phase::Init` is accepted as an input phase: the engine either treats
/// the action as a lead selection or passes INIT before applying it.
pub fn validate_action(state: &MatchState, action: &PlayerAction) -> Result<(), ActionError> {
    if action.side != state.turn.owner {
        return Err(ActionError::NotTurnOwner {
            owner: state.turn.owner,
            side: action.side,
        });
    }

    match state.turn.phase {
        Phase::Init | Phase::Action => {}
        phase => return Err(ActionError::WrongPhase { phase }),
    }

    let side = state.side(action.side);
    match action.kind {
        ActionKind::UseSkill { skill } => validate_skill(state, side, skill),
        ActionKind::UseItem { item } => validate_item(side, item),
        ActionKind::SwitchActive { unit } => validate_switch(side, unit),
        ActionKind::EndTurn => Ok(()),
    }
}

fn validate_skill(state: &MatchState, side: &SideState, skill_id: SkillId) -> Result<(), ActionError> {
    let unit = side.active_unit();
    if !unit.is_alive() {
        return Err(ActionError::UnitIncapacitated { unit: unit.id() });
    }
    if unit.statuses.has(StatusKind::Stun) {
        return Err(ActionError::Stunned { unit: unit.id() });
    }

    let skill = unit
        .def
        .skill(skill_id)
        .ok_or(ActionError::SkillNotFound { skill: skill_id })?;

    let remaining = unit.cooldown_of(skill_id);
    if remaining > 0 {
        return Err(ActionError::OnCooldown {
            skill: skill_id,
            remaining,
        });
    }

    if unit.resource < skill.resource_cost {
        return Err(ActionError::InsufficientResource {
            skill: skill_id,
            required: skill.resource_cost,
            available: unit.resource,
        });
    }

    if skill.is_ultimate {
        if let Some(unlock_turn) = skill.unlock_turn {
            if state.turn.number < unlock_turn {
                return Err(ActionError::UltimateLocked {
                    skill: skill_id,
                    unlock_turn,
                });
            }
        }
    }

    Ok(())
}

fn validate_item(side: &SideState, item: ItemId) -> Result<(), ActionError> {
    let unit = side.active_unit();
    if !unit.is_alive() {
        return Err(ActionError::UnitIncapacitated { unit: unit.id() });
    }
    side.hand_position(item)
        .map(|_| ())
        .ok_or(ActionError::ItemNotInHand { item })
}

fn validate_switch(side: &SideState, unit: UnitId) -> Result<(), ActionError> {
    let position = side
        .bench_position(unit)
        .ok_or(ActionError::SwitchTargetNotOnBench { unit })?;
    match side.bench_unit(position) {
        Some(target) if target.is_alive() => Ok(()),
        _ => Err(ActionError::SwitchTargetFainted { unit }),
    }
}
