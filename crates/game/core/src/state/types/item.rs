//! Item instances held in a side's hand, deck and discard pile.

use super::{ItemId, StatusKind};

/// Behavior of an item when used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    /// Restores `value` HP to the user's active unit.
    Heal,
    /// Attaches `status` with `value` to the user's active unit.
    Buff { status: StatusKind, duration: u32 },
    /// Attaches `status` with `value` to the opposing active unit.
    Debuff { status: StatusKind, duration: u32 },
    /// Shield, energize or cleanse the user's active unit.
    Utility(UtilityKind),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UtilityKind {
    Shield,
    Energize,
    Cleanse,
}

impl ItemKind {
    /// Debuffs target the opponent and can be dodged.
    pub const fn is_offensive(self) -> bool {
        matches!(self, ItemKind::Debuff { .. })
    }

    pub const fn is_defensive(self) -> bool {
        matches!(
            self,
            ItemKind::Heal | ItemKind::Utility(UtilityKind::Shield) | ItemKind::Utility(UtilityKind::Cleanse)
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemUses {
    Single,
    Multi { remaining: u32 },
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemInstance {
    pub id: ItemId,
    pub name: String,
    pub kind: ItemKind,
    pub value: u32,
    pub uses: ItemUses,
}

impl ItemInstance {
    /// Consumes one use. Returns `true` while the item can still be used.
    pub fn consume(&mut self) -> bool {
        match &mut self.uses {
            ItemUses::Single => false,
            ItemUses::Multi { remaining } => {
                *remaining = remaining.saturating_sub(1);
                *remaining > 0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_use_items_run_out() {
        let mut item = ItemInstance {
            id: ItemId(1),
            name: "Tonic".into(),
            kind: ItemKind::Heal,
            value: 10,
            uses: ItemUses::Multi { remaining: 2 },
        };
        assert!(item.consume());
        assert!(!item.consume());
    }

    #[test]
    fn single_use_items_are_spent() {
        let mut item = ItemInstance {
            id: ItemId(2),
            name: "Bomb".into(),
            kind: ItemKind::Debuff {
                status: StatusKind::Burn,
                duration: 2,
            },
            value: 4,
            uses: ItemUses::Single,
        };
        assert!(item.kind.is_offensive());
        assert!(!item.consume());
    }
}
