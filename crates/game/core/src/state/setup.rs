//! Match initialization from materialized rosters.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use arrayvec::ArrayVec;

use super::{
    ComboDefinition, Controller, EventFlags, ItemInstance, MatchId, MatchRules, MatchState,
    RosterError, SideId, SideState, TurnState, UnitDefinition, UnitState,
};
use crate::config::BattleConfig;

/// Output of roster materialization for one side.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SideSetup {
    pub participant: String,
    pub controller: Controller,
    /// First unit leads; the rest fill the bench in order.
    pub roster: Vec<UnitDefinition>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub item_pool: Vec<ItemInstance>,
}

/// Everything needed to create a match.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchSetup {
    pub id: MatchId,
    pub seed: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub config: BattleConfig,
    #[cfg_attr(feature = "serde", serde(default))]
    pub combos: Vec<ComboDefinition>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub events: EventFlags,
    pub side_a: SideSetup,
    pub side_b: SideSetup,
}

impl MatchState {
    /// Builds the initial state: turn 0, side A to act, phase INIT.
    ///
    /// Each side's hand is filled from the front of its item pool; the rest
    /// becomes the draw pile.
    pub fn from_setup(setup: MatchSetup) -> Result<Self, RosterError> {
        let MatchSetup {
            id,
            seed,
            config,
            combos,
            events,
            side_a,
            side_b,
        } = setup;

        let sides = [
            build_side(SideId::A, side_a, &config)?,
            build_side(SideId::B, side_b, &config)?,
        ];

        tracing::debug!(
            target: "battle::engine",
            match_id = %id,
            seed,
            "materialized match",
        );

        Ok(Self {
            id,
            seed,
            turn: TurnState::new(),
            sides,
            rules: Arc::new(MatchRules {
                config,
                combos,
                events,
            }),
            event_log: Vec::new(),
            outcome: None,
        })
    }
}

fn build_side(
    side: SideId,
    setup: SideSetup,
    config: &BattleConfig,
) -> Result<SideState, RosterError> {
    if setup.roster.len() != BattleConfig::ROSTER_SIZE {
        return Err(RosterError::WrongRosterSize {
            side,
            expected: BattleConfig::ROSTER_SIZE,
            found: setup.roster.len(),
        });
    }

    let mut seen = HashSet::new();
    for def in &setup.roster {
        if !seen.insert(def.id) {
            return Err(RosterError::DuplicateUnit { side, unit: def.id });
        }
        validate_unit(side, def)?;
    }

    let mut items = HashSet::new();
    for item in &setup.item_pool {
        if !items.insert(item.id) {
            return Err(RosterError::DuplicateItem {
                side,
                item: item.id,
            });
        }
    }

    let roster: ArrayVec<UnitState, { BattleConfig::ROSTER_SIZE }> = setup
        .roster
        .into_iter()
        .map(|def| UnitState::new(Arc::new(def), config.starting_resource))
        .collect();

    let mut deck: VecDeque<ItemInstance> = setup.item_pool.into();
    let mut hand = ArrayVec::new();
    while !hand.is_full() {
        match deck.pop_front() {
            Some(item) => hand.push(item),
            None => break,
        }
    }

    Ok(SideState {
        id: side,
        participant: setup.participant,
        controller: setup.controller,
        roster,
        active: 0,
        bench: (1..BattleConfig::ROSTER_SIZE as u8).collect(),
        hand,
        deck,
        discard: Vec::new(),
        lead_pending: true,
    })
}

fn validate_unit(side: SideId, def: &UnitDefinition) -> Result<(), RosterError> {
    let invalid = |reason| RosterError::InvalidUnit {
        side,
        unit: def.id,
        reason,
    };

    if def.max_hp == 0 {
        return Err(invalid("max HP must be positive"));
    }
    if def.skills.len() > BattleConfig::MAX_SKILLS {
        return Err(invalid("too many skills"));
    }
    let mut skill_ids = HashSet::new();
    if !def.skills.iter().all(|s| skill_ids.insert(s.id)) {
        return Err(invalid("duplicate skill id"));
    }
    let bad_chance = def
        .skills
        .iter()
        .flat_map(|s| s.effects.iter())
        .any(|e| !(0.0..=1.0).contains(&e.chance));
    if bad_chance {
        return Err(invalid("effect chance outside [0, 1]"));
    }
    Ok(())
}
