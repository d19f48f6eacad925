//! Enumerates the currently legal actions of a side.

use super::{ActionKind, PlayerAction, validate_action};
use crate::state::{MatchState, SideId};

/// Every action `side` could submit right now.
///
/// Candidates are generated from the active unit's skills, the hand and
/// the bench, then filtered through [`validate_action`]. `EndTurn` is
/// included whenever the side may act at all. Returns an empty list for a
/// terminal match or when `side` does not own the turn.
pub fn available_actions(state: &MatchState, side: SideId) -> Vec<ActionKind> {
    if state.is_terminal() {
        return Vec::new();
    }

    let side_state = state.side(side);
    let skills = side_state
        .active_unit()
        .def
        .skills
        .iter()
        .map(|skill| ActionKind::UseSkill { skill: skill.id });
    let items = side_state
        .hand
        .iter()
        .map(|item| ActionKind::UseItem { item: item.id });
    let switches = side_state
        .bench_units()
        .map(|unit| ActionKind::SwitchActive { unit: unit.id() });

    skills
        .chain(items)
        .chain(switches)
        .chain(std::iter::once(ActionKind::EndTurn))
        .filter(|kind| validate_action(state, &PlayerAction::new(side, *kind)).is_ok())
        .collect()
}
