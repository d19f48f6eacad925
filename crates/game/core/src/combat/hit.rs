//! Dodge and critical-hit rolls.
//!
//! Rolls are drawn from [`Rolls`] in a fixed order: dodge first (only for
//! offensive sources), then crit (only for damaging sources), then one roll
//! per effect.

use crate::env::{RngOracle, Rolls};

/// Rolls whether the defender dodges.
pub fn roll_dodge<R: RngOracle + ?Sized>(rolls: &mut Rolls<'_, R>, dodge_chance: f64) -> bool {
    rolls.chance(dodge_chance)
}

/// Rolls whether the hit is critical.
///
/// The flag is informational: it does not change the damage dealt.
pub fn roll_crit<R: RngOracle + ?Sized>(rolls: &mut Rolls<'_, R>, crit_chance: f64) -> bool {
    rolls.chance(crit_chance.clamp(0.0, 1.0))
}
