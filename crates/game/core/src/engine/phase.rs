//! Engine-driven phases: INIT pass, RESOLUTION and END_TURN.

use tracing::debug;

use crate::state::{
    EffectTarget, MatchOutcome, MatchState, OutcomeReason, Phase, ResolvedResult, SideId, SkillId,
    StatusKind, Switch, TickReport,
};

/// Leaves INIT for ACTION, closing the owner's lead window.
pub(super) fn pass_init(state: &mut MatchState) {
    let owner = state.turn.owner;
    state.side_mut(owner).lead_pending = false;
    state.turn.enter(Phase::Action);
}

/// RESOLUTION: tick the acting unit, promote fainted units, check for a
/// winner.
pub(super) fn resolution(
    state: &mut MatchState,
    acting: SideId,
    used_skill: Option<SkillId>,
    result: &mut ResolvedResult,
) {
    state.turn.enter(Phase::Resolution);

    let fresh: Vec<StatusKind> = result
        .resolution
        .iter()
        .flat_map(|r| &r.statuses_applied)
        .filter(|a| a.target == EffectTarget::Caster && !a.kind.is_instant())
        .map(|a| a.kind)
        .collect();
    result.tick = tick_active(state, acting, used_skill, &fresh);
    if let Some(unit) = result.tick.unit {
        if result.tick.damage > 0 && !state.side(acting).active_unit().is_alive() {
            result.fainted.push(unit);
        }
    }

    for side in [acting, acting.opponent()] {
        if let Some((outgoing, incoming)) = state.side_mut(side).promote_if_fainted() {
            debug!(
                target: "battle::engine",
                match_id = %state.id,
                %side,
                %outgoing,
                %incoming,
                "promoted bench unit",
            );
            result.promoted.push(Switch {
                side,
                outgoing,
                incoming,
            });
        }
    }

    if let Some(winner) = knockout_winner(state, acting) {
        state.outcome = Some(MatchOutcome {
            winner,
            reason: OutcomeReason::Knockout,
        });
        result.winner = Some(winner);
    }
}

/// END_TURN: draw for the owner, hand off and open the next turn.
pub(super) fn end_turn(state: &mut MatchState, result: &mut ResolvedResult) {
    state.turn.enter(Phase::EndTurn);
    let owner = state.turn.owner;
    result.item_drawn = state.side_mut(owner).draw_item();

    state.turn.hand_off();
    let next = state.turn.owner;
    if !state.side(next).lead_pending {
        state.turn.enter(Phase::Action);
    }
}

/// Periodic effects, durations, cooldowns and resource for the acting
/// side's active unit. Bench units are not processed.
///
/// Statuses in `fresh` were placed on the unit by this action and do not
/// lose a turn of duration before the opponent has acted.
fn tick_active(
    state: &mut MatchState,
    acting: SideId,
    used_skill: Option<SkillId>,
    fresh: &[StatusKind],
) -> TickReport {
    let config = &state.rules.config;
    let (per_turn, max_resource) = (config.resource_per_turn, config.max_resource);
    let unit = state.side_mut(acting).active_unit_mut();
    if !unit.is_alive() {
        return TickReport::default();
    }

    let damage = unit
        .statuses
        .value_of(StatusKind::Burn)
        .saturating_add(unit.statuses.value_of(StatusKind::Poison));
    let damage = damage.min(unit.current_hp);
    unit.current_hp -= damage;
    let healed = unit.heal(unit.statuses.value_of(StatusKind::Regen));

    let expired = unit.statuses.tick(fresh);
    unit.tick_cooldowns(used_skill);
    unit.resource = unit.resource.saturating_add(per_turn).min(max_resource);

    TickReport {
        unit: Some(unit.id()),
        damage,
        healed,
        expired,
    }
}

/// Winner once a side has no unit left with HP. If both sides are wiped out
/// in the same resolution the acting side wins.
fn knockout_winner(state: &MatchState, acting: SideId) -> Option<SideId> {
    let acting_out = state.side(acting).is_defeated();
    let opponent_out = state.side(acting.opponent()).is_defeated();
    match (acting_out, opponent_out) {
        (_, true) => Some(acting),
        (true, false) => Some(acting.opponent()),
        (false, false) => None,
    }
}
