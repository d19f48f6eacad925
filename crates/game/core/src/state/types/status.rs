//! Status effect system for units.
//!
//! Status effects are temporary conditions attached to a unit. Durations are
//! counted in the owning side's turns and only tick while the unit is
//! active; bench units keep whatever they had until they are swapped out,
//! at which point their statuses are cleared.
//!
//! Reapplying a kind that is already present refreshes its duration and
//! keeps the original value (no stacking).

use arrayvec::ArrayVec;

use crate::config::BattleConfig;

/// Active status effects on a unit.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { BattleConfig::MAX_STATUS_EFFECTS }>,
}

/// A single status effect with remaining duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusKind,
    /// Magnitude (percent for stat modifiers, HP for periodic effects).
    pub value: u32,
    /// Owner turns left before the effect expires.
    pub remaining: u32,
}

/// Kinds of effects a skill or item can carry.
///
/// `Heal`, `Shield`, `Energize` and `Cleanse` resolve instantly and are
/// never stored on a unit; every other kind becomes a timed status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum StatusKind {
    // ========================================================================
    // Instant
    // ========================================================================
    /// Restore HP.
    Heal,
    /// Add absorb shield.
    Shield,
    /// Restore skill resource.
    Energize,
    /// Remove all debuffs.
    Cleanse,

    // ========================================================================
    // Buffs
    // ========================================================================
    /// Attack +value%.
    AttackUp,
    /// Defense +value%.
    DefenseUp,
    /// Heal value HP at each tick.
    Regen,
    /// Attacks are flagged as counter-attacks.
    Counter,

    // ========================================================================
    // Debuffs
    // ========================================================================
    /// Attack -value%.
    AttackDown,
    /// Defense -value%.
    DefenseDown,
    /// Lose value HP at each tick.
    Burn,
    /// Lose value HP at each tick.
    Poison,
    /// Cannot use skills.
    Stun,
}

impl StatusKind {
    /// Resolves immediately instead of attaching to the unit.
    pub const fn is_instant(self) -> bool {
        matches!(self, Self::Heal | Self::Shield | Self::Energize | Self::Cleanse)
    }

    pub const fn is_debuff(self) -> bool {
        matches!(
            self,
            Self::AttackDown | Self::DefenseDown | Self::Burn | Self::Poison | Self::Stun
        )
    }

    /// Heals, shields and defensive buffs; used by the opponent heuristics.
    pub const fn is_defensive(self) -> bool {
        matches!(
            self,
            Self::Heal | Self::Shield | Self::Regen | Self::DefenseUp | Self::Cleanse
        )
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

impl StatusEffects {
    /// Creates an empty status effect set.
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Checks if a status of the given kind is active.
    pub fn has(&self, kind: StatusKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    /// Returns the value of an active status, or 0.
    pub fn value_of(&self, kind: StatusKind) -> u32 {
        self.effects
            .iter()
            .find(|e| e.kind == kind)
            .map(|e| e.value)
            .unwrap_or(0)
    }

    /// Returns the remaining duration of an active status.
    pub fn remaining(&self, kind: StatusKind) -> Option<u32> {
        self.effects
            .iter()
            .find(|e| e.kind == kind)
            .map(|e| e.remaining)
    }

    /// Attaches a status or refreshes the duration of an existing one.
    ///
    /// When the set is full the effect closest to expiring is evicted.
    /// Zero-duration and instant kinds are ignored.
    pub fn apply(&mut self, kind: StatusKind, value: u32, duration: u32) {
        if duration == 0 || kind.is_instant() {
            return;
        }

        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == kind) {
            existing.remaining = duration;
            return;
        }

        if self.effects.is_full() {
            if let Some(idx) = self
                .effects
                .iter()
                .enumerate()
                .min_by_key(|(_, e)| e.remaining)
                .map(|(idx, _)| idx)
            {
                self.effects.remove(idx);
            }
        }

        self.effects.push(StatusEffect {
            kind,
            value,
            remaining: duration,
        });
    }

    /// Removes every debuff.
    pub fn cleanse(&mut self) {
        self.effects.retain(|e| !e.kind.is_debuff());
    }

    /// Decrements every duration by one and drops expired effects.
    ///
    /// Kinds listed in `fresh` were applied during the current action and
    /// keep their full duration. Returns the kinds that expired.
    pub fn tick(&mut self, fresh: &[StatusKind]) -> Vec<StatusKind> {
        let mut expired = Vec::new();
        for effect in self.effects.iter_mut() {
            if fresh.contains(&effect.kind) {
                continue;
            }
            effect.remaining = effect.remaining.saturating_sub(1);
            if effect.remaining == 0 {
                expired.push(effect.kind);
            }
        }
        self.effects.retain(|e| e.remaining > 0);
        expired
    }

    /// Removes every effect.
    pub fn clear(&mut self) {
        self.effects.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reapply_refreshes_duration_without_stacking_value() {
        let mut statuses = StatusEffects::empty();
        statuses.apply(StatusKind::Burn, 5, 2);
        statuses.tick(&[]);
        statuses.apply(StatusKind::Burn, 9, 3);

        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses.value_of(StatusKind::Burn), 5);
        assert_eq!(statuses.remaining(StatusKind::Burn), Some(3));
    }

    #[test]
    fn tick_expires_effects() {
        let mut statuses = StatusEffects::empty();
        statuses.apply(StatusKind::Stun, 0, 1);
        statuses.apply(StatusKind::AttackUp, 20, 2);

        let expired = statuses.tick(&[]);
        assert_eq!(expired, vec![StatusKind::Stun]);
        assert!(!statuses.has(StatusKind::Stun));
        assert!(statuses.has(StatusKind::AttackUp));
    }

    #[test]
    fn fresh_kinds_keep_their_duration() {
        let mut statuses = StatusEffects::empty();
        statuses.apply(StatusKind::Counter, 0, 1);
        statuses.apply(StatusKind::Burn, 3, 1);

        let expired = statuses.tick(&[StatusKind::Counter]);
        assert_eq!(expired, vec![StatusKind::Burn]);
        assert_eq!(statuses.remaining(StatusKind::Counter), Some(1));

        let expired = statuses.tick(&[]);
        assert_eq!(expired, vec![StatusKind::Counter]);
        assert!(statuses.is_empty());
    }

    #[test]
    fn instant_kinds_are_not_stored() {
        let mut statuses = StatusEffects::empty();
        statuses.apply(StatusKind::Heal, 30, 3);
        statuses.apply(StatusKind::Shield, 30, 3);
        assert!(statuses.is_empty());
    }

    #[test]
    fn full_set_evicts_closest_to_expiry() {
        let mut statuses = StatusEffects::empty();
        let kinds = [
            StatusKind::AttackUp,
            StatusKind::DefenseUp,
            StatusKind::Regen,
            StatusKind::Counter,
            StatusKind::AttackDown,
            StatusKind::DefenseDown,
            StatusKind::Burn,
            StatusKind::Poison,
        ];
        for (i, kind) in kinds.into_iter().enumerate() {
            statuses.apply(kind, 1, 10 + i as u32);
        }
        statuses.apply(StatusKind::Stun, 0, 1);

        assert_eq!(statuses.len(), BattleConfig::MAX_STATUS_EFFECTS);
        assert!(!statuses.has(StatusKind::AttackUp));
        assert!(statuses.has(StatusKind::Stun));
    }

    #[test]
    fn cleanse_keeps_buffs() {
        let mut statuses = StatusEffects::empty();
        statuses.apply(StatusKind::Poison, 4, 3);
        statuses.apply(StatusKind::Regen, 4, 3);
        statuses.cleanse();
        assert!(!statuses.has(StatusKind::Poison));
        assert!(statuses.has(StatusKind::Regen));
    }
}
