use crate::state::{ItemId, SideId, SkillId, UnitId};

/// The action types a turn owner may submit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "kebab-case")]
pub enum ActionKind {
    /// Use a skill of the active unit on the opposing active unit.
    UseSkill { skill: SkillId },
    /// Use an item from the hand.
    UseItem { item: ItemId },
    /// Swap the active unit with a bench unit.
    #[strum(serialize = "switch-active-unit")]
    SwitchActive { unit: UnitId },
    /// Do nothing and pass the turn.
    EndTurn,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// An action submitted by one side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerAction {
    pub side: SideId,
    pub kind: ActionKind,
}

impl PlayerAction {
    pub fn new(side: SideId, kind: ActionKind) -> Self {
        Self { side, kind }
    }

    pub fn use_skill(side: SideId, skill: SkillId) -> Self {
        Self::new(side, ActionKind::UseSkill { skill })
    }

    pub fn use_item(side: SideId, item: ItemId) -> Self {
        Self::new(side, ActionKind::UseItem { item })
    }

    pub fn switch_to(side: SideId, unit: UnitId) -> Self {
        Self::new(side, ActionKind::SwitchActive { unit })
    }

    pub fn end_turn(side: SideId) -> Self {
        Self::new(side, ActionKind::EndTurn)
    }
}
