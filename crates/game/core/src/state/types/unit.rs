//! Unit definitions and runtime unit state.
//!
//! A [`UnitDefinition`] is produced once by roster materialization and never
//! changes. [`UnitState`] wraps it behind an `Arc` so cloning a match for a
//! copy-on-write update only copies the mutable runtime fields.

use std::sync::Arc;

use arrayvec::ArrayVec;
use bitflags::bitflags;

use super::{SkillDefinition, SkillId, StatusEffects, StatusKind, UnitId};
use crate::config::BattleConfig;

/// Elemental affinity of a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Element {
    Fire,
    Water,
    Nature,
    Earth,
    Air,
    Light,
    Shadow,
}

impl Element {
    /// Whether this element is strong against `defender`.
    ///
    /// Fire > Nature > Water > Fire, Earth > Air, Air > Earth,
    /// Light > Shadow, Shadow > Light.
    pub const fn is_strong_against(self, defender: Element) -> bool {
        matches!(
            (self, defender),
            (Element::Fire, Element::Nature)
                | (Element::Nature, Element::Water)
                | (Element::Water, Element::Fire)
                | (Element::Earth, Element::Air)
                | (Element::Air, Element::Earth)
                | (Element::Light, Element::Shadow)
                | (Element::Shadow, Element::Light)
        )
    }

    /// Attacks from these elements count as magical.
    pub const fn is_magic(self) -> bool {
        matches!(self, Element::Light | Element::Shadow)
    }
}

/// Home region of a unit. Same-region allies grant the regional bonus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Region {
    Highlands,
    Coast,
    Forest,
    Desert,
    Tundra,
    Capital,
}

/// Seasonal events during which some units receive a configured bonus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

bitflags! {
    /// Static tags attached to a unit definition.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct UnitTags: u8 {
        /// Empowered during lunar events.
        const NIGHT = 1 << 0;
    }
}

/// Passive traits a unit carries for the whole match.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PassiveKind {
    /// Probability of dodging an incoming offensive action.
    Evasive { chance: f64 },
    /// Added to the baseline critical chance.
    Keen { crit_bonus: f64 },
    /// Fraction of damage taken that is returned to the attacker.
    Thorns { fraction: f64 },
    /// Fraction of magical damage ignored.
    Warded { fraction: f64 },
    /// Defense multiplier `1 + percent/100` per other living ally on the bench.
    Bulwark { percent_per_ally: u32 },
}

/// Immutable description of a unit, as produced by roster materialization.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitDefinition {
    pub id: UnitId,
    pub name: String,
    pub attack: u32,
    pub defense: u32,
    pub max_hp: u32,
    pub element: Element,
    pub region: Region,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: UnitTags,
    pub skills: Vec<SkillDefinition>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub passive: Option<PassiveKind>,
    /// Attack multiplier applied while the given season is active.
    #[cfg_attr(feature = "serde", serde(default))]
    pub seasonal_bonus: Option<(Season, f64)>,
}

impl UnitDefinition {
    pub fn skill(&self, id: SkillId) -> Option<&SkillDefinition> {
        self.skills.iter().find(|skill| skill.id == id)
    }

    pub fn dodge_chance(&self) -> f64 {
        match self.passive {
            Some(PassiveKind::Evasive { chance }) => chance,
            _ => 0.0,
        }
    }

    pub fn crit_bonus(&self) -> f64 {
        match self.passive {
            Some(PassiveKind::Keen { crit_bonus }) => crit_bonus,
            _ => 0.0,
        }
    }

    pub fn reflect_fraction(&self) -> f64 {
        match self.passive {
            Some(PassiveKind::Thorns { fraction }) => fraction,
            _ => 0.0,
        }
    }

    pub fn magic_resistance(&self) -> f64 {
        match self.passive {
            Some(PassiveKind::Warded { fraction }) => fraction,
            _ => 0.0,
        }
    }
}

/// Remaining cooldown of one skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cooldown {
    pub skill: SkillId,
    pub remaining: u32,
}

/// Runtime state of one unit in a roster.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitState {
    pub def: Arc<UnitDefinition>,
    /// Clamped to `[0, def.max_hp]`.
    pub current_hp: u32,
    pub shields: u32,
    pub statuses: StatusEffects,
    pub cooldowns: ArrayVec<Cooldown, { BattleConfig::MAX_SKILLS }>,
    /// Skill resource (energy) available for skill costs.
    pub resource: u32,
}

impl UnitState {
    pub fn new(def: Arc<UnitDefinition>, starting_resource: u32) -> Self {
        let current_hp = def.max_hp;
        Self {
            def,
            current_hp,
            shields: 0,
            statuses: StatusEffects::empty(),
            cooldowns: ArrayVec::new(),
            resource: starting_resource,
        }
    }

    #[inline]
    pub fn id(&self) -> UnitId {
        self.def.id
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    /// Current HP over max HP, in `[0, 1]`.
    pub fn health_fraction(&self) -> f64 {
        if self.def.max_hp == 0 {
            return 0.0;
        }
        self.current_hp as f64 / self.def.max_hp as f64
    }

    pub fn cooldown_of(&self, skill: SkillId) -> u32 {
        self.cooldowns
            .iter()
            .find(|c| c.skill == skill)
            .map(|c| c.remaining)
            .unwrap_or(0)
    }

    /// Puts a skill on cooldown. Zero clears it.
    pub fn set_cooldown(&mut self, skill: SkillId, turns: u32) {
        self.cooldowns.retain(|c| c.skill != skill);
        if turns > 0 && !self.cooldowns.is_full() {
            self.cooldowns.push(Cooldown {
                skill,
                remaining: turns,
            });
        }
    }

    /// Decrements every cooldown except `skip` (the skill used this turn).
    pub fn tick_cooldowns(&mut self, skip: Option<SkillId>) {
        for cooldown in self.cooldowns.iter_mut() {
            if Some(cooldown.skill) != skip {
                cooldown.remaining = cooldown.remaining.saturating_sub(1);
            }
        }
        self.cooldowns.retain(|c| c.remaining > 0);
    }

    /// Effective attack after percent statuses.
    pub fn effective_attack(&self) -> f64 {
        scale_percent(
            self.def.attack,
            self.statuses.value_of(StatusKind::AttackUp),
            self.statuses.value_of(StatusKind::AttackDown),
        )
    }

    /// Effective defense after percent statuses.
    pub fn effective_defense(&self) -> f64 {
        scale_percent(
            self.def.defense,
            self.statuses.value_of(StatusKind::DefenseUp),
            self.statuses.value_of(StatusKind::DefenseDown),
        )
    }

    /// Applies damage to shields first, then HP. Returns HP actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let absorbed = amount.min(self.shields);
        self.shields -= absorbed;
        let hp_loss = (amount - absorbed).min(self.current_hp);
        self.current_hp -= hp_loss;
        hp_loss
    }

    /// Restores HP up to the maximum. Returns HP actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if !self.is_alive() {
            return 0;
        }
        let restored = amount.min(self.def.max_hp - self.current_hp);
        self.current_hp += restored;
        restored
    }
}

fn scale_percent(base: u32, up: u32, down: u32) -> f64 {
    let percent = (100 + up as i64 - down as i64).max(0);
    base as f64 * percent as f64 / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(attack: u32, defense: u32, max_hp: u32) -> UnitState {
        let def = UnitDefinition {
            id: UnitId(1),
            name: "Test".into(),
            attack,
            defense,
            max_hp,
            element: Element::Fire,
            region: Region::Coast,
            tags: UnitTags::empty(),
            skills: Vec::new(),
            passive: None,
            seasonal_bonus: None,
        };
        UnitState::new(Arc::new(def), 0)
    }

    #[test]
    fn shields_absorb_before_hp() {
        let mut u = unit(10, 10, 50);
        u.shields = 8;
        let lost = u.take_damage(12);
        assert_eq!(lost, 4);
        assert_eq!(u.shields, 0);
        assert_eq!(u.current_hp, 46);
    }

    #[test]
    fn hp_clamps_to_bounds() {
        let mut u = unit(10, 10, 50);
        assert_eq!(u.take_damage(80), 50);
        assert_eq!(u.current_hp, 0);
        assert_eq!(u.heal(20), 0);

        let mut v = unit(10, 10, 50);
        v.take_damage(5);
        assert_eq!(v.heal(20), 5);
        assert_eq!(v.current_hp, 50);
    }

    #[test]
    fn percent_statuses_scale_stats() {
        let mut u = unit(20, 10, 50);
        u.statuses.apply(StatusKind::AttackUp, 50, 2);
        u.statuses.apply(StatusKind::DefenseDown, 30, 2);
        assert_eq!(u.effective_attack(), 30.0);
        assert_eq!(u.effective_defense(), 7.0);
    }

    #[test]
    fn cooldown_tick_skips_used_skill() {
        let mut u = unit(10, 10, 50);
        u.set_cooldown(SkillId(1), 2);
        u.set_cooldown(SkillId(2), 1);
        u.tick_cooldowns(Some(SkillId(1)));
        assert_eq!(u.cooldown_of(SkillId(1)), 2);
        assert_eq!(u.cooldown_of(SkillId(2)), 0);
    }

    #[test]
    fn element_chart() {
        assert!(Element::Fire.is_strong_against(Element::Nature));
        assert!(!Element::Nature.is_strong_against(Element::Fire));
        assert!(Element::Light.is_strong_against(Element::Shadow));
        assert!(Element::Shadow.is_magic());
    }
}
