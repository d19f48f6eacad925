//! Damage calculation.

use super::ModifierContext;

/// Computes final damage before resistances.
///
/// # Formula
///
/// ```text
/// raw        = attack_pipeline(power * attack / 10)
/// mitigation = defense_pipeline(defense / 10)
/// final      = max(1, floor(raw - mitigation))
/// ```
///
/// Zero-power sources deal no damage at all.
pub fn calculate_damage(power: u32, attack: f64, defense: f64, ctx: &ModifierContext) -> u32 {
    if power == 0 {
        return 0;
    }
    let raw = ctx.attack.apply(power as f64 * (attack / 10.0));
    let mitigation = ctx.defense.apply(defense / 10.0);
    let mitigated = (raw - mitigation).floor();
    if mitigated < 1.0 {
        1
    } else {
        mitigated as u32
    }
}

/// Reduces magical damage by the defender's resistance fraction.
///
/// A hit that landed keeps dealing at least 1.
pub fn apply_resistance(damage: u32, resistance: f64, magical: bool) -> u32 {
    if damage == 0 || !magical || resistance <= 0.0 {
        return damage;
    }
    let reduced = (damage as f64 * (1.0 - resistance.min(1.0))).floor() as u32;
    reduced.max(1)
}

/// Portion of `damage` returned to the attacker.
pub fn reflected_damage(damage: u32, fraction: f64) -> u32 {
    if fraction <= 0.0 {
        return 0;
    }
    (damage as f64 * fraction).floor() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::ModifierSource;

    #[test]
    fn elemental_advantage_example() {
        let mut ctx = ModifierContext::neutral(0.0);
        ctx.attack.push(ModifierSource::Elemental, 1.5);
        assert_eq!(calculate_damage(20, 10.0, 5.0, &ctx), 29);
    }

    #[test]
    fn hits_deal_at_least_one() {
        let ctx = ModifierContext::neutral(0.0);
        assert_eq!(calculate_damage(1, 1.0, 500.0, &ctx), 1);
        assert_eq!(calculate_damage(0, 50.0, 0.0, &ctx), 0);
    }

    #[test]
    fn defense_pipeline_scales_mitigation() {
        let mut ctx = ModifierContext::neutral(0.0);
        ctx.defense.push(ModifierSource::ComboDefense, 2.0);
        // raw 20, mitigation 20/10 * 2 = 4
        assert_eq!(calculate_damage(20, 10.0, 20.0, &ctx), 16);
    }

    #[test]
    fn resistance_only_applies_to_magic() {
        assert_eq!(apply_resistance(20, 0.3, true), 14);
        assert_eq!(apply_resistance(20, 0.3, false), 20);
        assert_eq!(apply_resistance(1, 0.9, true), 1);
    }

    #[test]
    fn reflection_rounds_down() {
        assert_eq!(reflected_damage(29, 0.25), 7);
        assert_eq!(reflected_damage(29, 0.0), 0);
    }
}
