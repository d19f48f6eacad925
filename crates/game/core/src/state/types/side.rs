//! Per-side state: roster arena, active slot, bench and items.
//!
//! Units live in `roster` for the whole match and are addressed by slot
//! index. `active` and `bench` only permute those indices, so the set of
//! unit identities on a side never changes.

use std::collections::VecDeque;

use arrayvec::ArrayVec;

use super::{ItemId, ItemInstance, SideId, UnitId, UnitState};
use crate::config::BattleConfig;

/// Opponent difficulty of a rule-based side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Who submits actions for a side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Controller {
    Human,
    Bot { difficulty: Difficulty },
}

impl Controller {
    pub fn is_bot(&self) -> bool {
        matches!(self, Controller::Bot { .. })
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SideState {
    pub id: SideId,
    /// External participant identifier.
    pub participant: String,
    pub controller: Controller,
    pub roster: ArrayVec<UnitState, { BattleConfig::ROSTER_SIZE }>,
    /// Roster slot of the active unit.
    pub active: u8,
    /// Roster slots of the bench, in order.
    pub bench: ArrayVec<u8, { BattleConfig::BENCH_CAPACITY }>,
    pub hand: ArrayVec<ItemInstance, { BattleConfig::HAND_CAPACITY }>,
    pub deck: VecDeque<ItemInstance>,
    pub discard: Vec<ItemInstance>,
    /// Set until the side has finished its first INIT phase.
    pub lead_pending: bool,
}

impl SideState {
    pub fn active_unit(&self) -> &UnitState {
        &self.roster[self.active as usize]
    }

    pub fn active_unit_mut(&mut self) -> &mut UnitState {
        &mut self.roster[self.active as usize]
    }

    pub fn bench_units(&self) -> impl Iterator<Item = &UnitState> {
        self.bench.iter().map(|&slot| &self.roster[slot as usize])
    }

    /// Bench unit at bench position `position`.
    pub fn bench_unit(&self, position: usize) -> Option<&UnitState> {
        self.bench
            .get(position)
            .map(|&slot| &self.roster[slot as usize])
    }

    /// Bench position holding unit `unit`.
    pub fn bench_position(&self, unit: UnitId) -> Option<usize> {
        self.bench
            .iter()
            .position(|&slot| self.roster[slot as usize].id() == unit)
    }

    /// Every unit on the field: active first, then bench in order.
    pub fn field_units(&self) -> impl Iterator<Item = &UnitState> {
        std::iter::once(self.active_unit()).chain(self.bench_units())
    }

    /// Unit identities on the field, active first.
    pub fn field_ids(&self) -> Vec<UnitId> {
        self.field_units().map(UnitState::id).collect()
    }

    pub fn living_bench_count(&self) -> usize {
        self.bench_units().filter(|u| u.is_alive()).count()
    }

    /// True when every unit on the side has 0 HP.
    pub fn is_defeated(&self) -> bool {
        self.field_units().all(|u| !u.is_alive())
    }

    /// Swaps the active unit with the bench unit at `position`.
    ///
    /// The outgoing unit takes the vacated bench slot and loses its statuses.
    /// Returns `(outgoing, incoming)`.
    pub fn swap_active(&mut self, position: usize) -> (UnitId, UnitId) {
        let outgoing = self.active;
        let incoming = self.bench[position];
        self.bench[position] = outgoing;
        self.active = incoming;
        self.roster[outgoing as usize].statuses.clear();
        (
            self.roster[outgoing as usize].id(),
            self.roster[incoming as usize].id(),
        )
    }

    /// Replaces a fainted active unit with the first living bench unit.
    pub fn promote_if_fainted(&mut self) -> Option<(UnitId, UnitId)> {
        if self.active_unit().is_alive() {
            return None;
        }
        let position = self
            .bench
            .iter()
            .position(|&slot| self.roster[slot as usize].is_alive())?;
        Some(self.swap_active(position))
    }

    pub fn hand_position(&self, item: ItemId) -> Option<usize> {
        self.hand.iter().position(|i| i.id == item)
    }

    /// Draws one item into the hand if there is room.
    pub fn draw_item(&mut self) -> Option<ItemId> {
        if self.hand.is_full() {
            return None;
        }
        let item = self.deck.pop_front()?;
        let id = item.id;
        self.hand.push(item);
        Some(id)
    }
}
