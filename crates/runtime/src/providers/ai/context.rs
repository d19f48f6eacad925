//! Read-only blackboard shared by candidate generation and scoring.

use battle_core::{
    ActionKind, Difficulty, ItemId, ItemInstance, MatchState, Phase, SideId, SideState,
    SkillDefinition, SkillId, UnitState, available_actions,
};

/// Context for one bot decision.
///
/// `available_actions` is computed once from the core validator so every
/// candidate the engine considers is legal by construction.
pub struct AiContext<'a> {
    pub side: SideId,
    pub state: &'a MatchState,
    pub difficulty: Difficulty,
    available_actions: Vec<ActionKind>,
}

impl<'a> AiContext<'a> {
    pub fn new(side: SideId, state: &'a MatchState, difficulty: Difficulty) -> Self {
        Self {
            side,
            state,
            difficulty,
            available_actions: available_actions(state, side),
        }
    }

    pub fn available_actions(&self) -> &[ActionKind] {
        &self.available_actions
    }

    pub fn phase(&self) -> Phase {
        self.state.turn.phase
    }

    pub fn own(&self) -> &'a SideState {
        self.state.side(self.side)
    }

    pub fn opponent(&self) -> &'a SideState {
        self.state.side(self.side.opponent())
    }

    pub fn own_active(&self) -> &'a UnitState {
        self.own().active_unit()
    }

    pub fn opponent_active(&self) -> &'a UnitState {
        self.opponent().active_unit()
    }

    pub fn skill(&self, id: SkillId) -> Option<&'a SkillDefinition> {
        self.own_active().def.skill(id)
    }

    pub fn item(&self, id: ItemId) -> Option<&'a ItemInstance> {
        let own = self.own();
        own.hand_position(id).map(|pos| &own.hand[pos])
    }
}
