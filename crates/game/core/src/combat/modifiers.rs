//! Attack-side and defense-side multiplier pipelines.
//!
//! A [`ModifierContext`] is built fresh for every resolution from the
//! current match state. Nothing here is stored on the match.
//!
//! Layer order is canonical:
//! attack `Regional → Elemental → Lunar → Seasonal → Combo → Counter`,
//! defense `ComboDefense → AllyCount`.

use crate::state::{MatchState, PassiveKind, SideId, SideState, StatusKind, UnitState, UnitTags};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModifierSource {
    Regional,
    Elemental,
    Lunar,
    Seasonal,
    Combo,
    Counter,
    ComboDefense,
    AllyCount,
}

/// One multiplicative layer.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Modifier {
    pub source: ModifierSource,
    pub multiplier: f64,
}

/// Ordered multiplicative layers, applied one after another.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiplierStack {
    layers: Vec<Modifier>,
}

impl MultiplierStack {
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    pub fn push(&mut self, source: ModifierSource, multiplier: f64) {
        self.layers.push(Modifier { source, multiplier });
    }

    /// Applies each layer in insertion order.
    pub fn apply(&self, base: f64) -> f64 {
        self.layers
            .iter()
            .fold(base, |value, layer| value * layer.multiplier)
    }

    pub fn contains(&self, source: ModifierSource) -> bool {
        self.layers.iter().any(|l| l.source == source)
    }

    pub fn layers(&self) -> &[Modifier] {
        &self.layers
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

/// Ephemeral modifiers for one resolution call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModifierContext {
    pub attack: MultiplierStack,
    pub defense: MultiplierStack,
    /// Baseline critical chance plus the attacker's passive bonus.
    pub crit_chance: f64,
}

impl ModifierContext {
    /// Context with no active modifiers.
    pub fn neutral(crit_chance: f64) -> Self {
        Self {
            attack: MultiplierStack::new(),
            defense: MultiplierStack::new(),
            crit_chance,
        }
    }

    /// Computes the context for `acting`'s active unit attacking the
    /// opposing active unit.
    pub fn from_match(state: &MatchState, acting: SideId) -> Self {
        let rules = &state.rules;
        let config = &rules.config;
        let attacking_side = state.side(acting);
        let defending_side = state.side(acting.opponent());
        let attacker = attacking_side.active_unit();
        let defender = defending_side.active_unit();

        let mut attack = MultiplierStack::new();
        if has_regional_ally(attacking_side, attacker) {
            attack.push(ModifierSource::Regional, config.regional_multiplier);
        }
        if attacker.def.element.is_strong_against(defender.def.element) {
            attack.push(ModifierSource::Elemental, config.elemental_multiplier);
        }
        if rules.events.lunar && attacker.def.tags.contains(UnitTags::NIGHT) {
            attack.push(ModifierSource::Lunar, config.lunar_multiplier);
        }
        if let (Some(season), Some((bonus_season, multiplier))) =
            (rules.events.season, attacker.def.seasonal_bonus)
        {
            if season == bonus_season {
                attack.push(ModifierSource::Seasonal, multiplier);
            }
        }
        for combo in rules.combos.iter().filter(|c| c.is_active(attacking_side)) {
            attack.push(ModifierSource::Combo, combo.attack_multiplier);
        }
        if attacker.statuses.has(StatusKind::Counter) {
            attack.push(ModifierSource::Counter, config.counter_multiplier);
        }

        let mut defense = MultiplierStack::new();
        for combo in rules.combos.iter().filter(|c| c.is_active(defending_side)) {
            defense.push(ModifierSource::ComboDefense, combo.defense_multiplier);
        }
        if let Some(PassiveKind::Bulwark { percent_per_ally }) = defender.def.passive {
            let allies = defending_side.living_bench_count();
            if allies > 0 {
                let bonus = percent_per_ally as f64 * allies as f64 / 100.0;
                defense.push(ModifierSource::AllyCount, 1.0 + bonus);
            }
        }

        Self {
            attack,
            defense,
            crit_chance: config.crit_chance + attacker.def.crit_bonus(),
        }
    }
}

/// At least one other living unit on the side shares the attacker's region.
fn has_regional_ally(side: &SideState, attacker: &UnitState) -> bool {
    side.bench_units()
        .any(|ally| ally.is_alive() && ally.def.region == attacker.def.region)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layers_apply_in_insertion_order() {
        let mut stack = MultiplierStack::new();
        stack.push(ModifierSource::Regional, 1.25);
        stack.push(ModifierSource::Elemental, 1.5);
        assert_eq!(stack.apply(20.0), 37.5);
        assert!(stack.contains(ModifierSource::Elemental));
        assert!(!stack.contains(ModifierSource::Lunar));
    }
}
