//! Utility table for decision candidates.
//!
//! Scores are additive: a base from the candidate's magnitude plus
//! situational bonuses keyed on the health fraction of either active unit.

use battle_core::{ItemInstance, ItemKind, SkillDefinition, UtilityKind};

use super::{AiContext, Candidate};

pub const ULTIMATE_BONUS: f64 = 50.0;
pub const FINISHER_BONUS: f64 = 40.0;
pub const DEFENSIVE_BONUS: f64 = 45.0;
pub const STATUS_BONUS: f64 = 15.0;
pub const SWAP_BASE: f64 = 30.0;

/// Opponent health fraction below which damage is prioritized.
pub const FINISHER_THRESHOLD: f64 = 0.3;
/// Own health fraction below which heals and shields are prioritized.
pub const DANGER_THRESHOLD: f64 = 0.35;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    pub score: f64,
}

/// Situation snapshot the table is evaluated against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Situation {
    pub own_health: f64,
    pub opponent_health: f64,
}

impl Situation {
    pub fn from_context(ctx: &AiContext<'_>) -> Self {
        Self {
            own_health: ctx.own_active().health_fraction(),
            opponent_health: ctx.opponent_active().health_fraction(),
        }
    }

    fn finishing(&self) -> bool {
        self.opponent_health < FINISHER_THRESHOLD
    }

    fn in_danger(&self) -> bool {
        self.own_health < DANGER_THRESHOLD
    }
}

/// Scores one candidate. `None` if it no longer refers to anything the
/// side owns.
pub fn score_candidate(ctx: &AiContext<'_>, candidate: Candidate) -> Option<ScoredCandidate> {
    let situation = Situation::from_context(ctx);
    let score = match candidate {
        Candidate::Skill(id) => score_skill(ctx.skill(id)?, situation),
        Candidate::Item(id) => score_item(ctx.item(id)?, situation),
        Candidate::Swap { ratio, .. } => SWAP_BASE * ratio.min(10.0),
    };
    Some(ScoredCandidate { candidate, score })
}

pub fn score_skill(skill: &SkillDefinition, situation: Situation) -> f64 {
    let mut score = f64::from(skill.power);
    // Legal candidates are already affordable and unlocked.
    if skill.is_ultimate {
        score += ULTIMATE_BONUS;
    }
    if skill.power > 0 && situation.finishing() {
        score += FINISHER_BONUS;
    }
    if skill.is_defensive() && situation.in_danger() {
        score += DEFENSIVE_BONUS;
    }
    if skill.has_buff_or_debuff() {
        score += STATUS_BONUS;
    }
    score
}

pub fn score_item(item: &ItemInstance, situation: Situation) -> f64 {
    let mut score = f64::from(item.value);
    match item.kind {
        ItemKind::Heal | ItemKind::Utility(UtilityKind::Shield) => {
            if situation.in_danger() {
                score += DEFENSIVE_BONUS;
            }
        }
        ItemKind::Utility(UtilityKind::Cleanse) => {
            if situation.in_danger() {
                score += STATUS_BONUS;
            }
        }
        ItemKind::Utility(UtilityKind::Energize) => {}
        ItemKind::Buff { .. } => score += STATUS_BONUS,
        ItemKind::Debuff { .. } => {
            score += STATUS_BONUS;
            if situation.finishing() {
                score += FINISHER_BONUS;
            }
        }
    }
    score
}

#[cfg(test)]
mod tests {
    use battle_core::{
        EffectDescriptor, ItemId, ItemUses, SkillId, StatusKind,
    };

    use super::*;

    const CALM: Situation = Situation {
        own_health: 1.0,
        opponent_health: 1.0,
    };

    fn item(kind: ItemKind, value: u32) -> ItemInstance {
        ItemInstance {
            id: ItemId(1),
            name: "item".into(),
            kind,
            value,
            uses: ItemUses::Single,
        }
    }

    #[test]
    fn skill_score_follows_power() {
        let weak = SkillDefinition::strike(SkillId(1), "jab", 10);
        let strong = SkillDefinition::strike(SkillId(2), "smash", 25);
        assert!(score_skill(&strong, CALM) > score_skill(&weak, CALM));
    }

    #[test]
    fn ultimate_outranks_plain_strike() {
        let strike = SkillDefinition::strike(SkillId(1), "strike", 40);
        let mut ultimate = SkillDefinition::strike(SkillId(2), "nova", 20);
        ultimate.is_ultimate = true;
        assert_eq!(score_skill(&ultimate, CALM), 70.0);
        assert!(score_skill(&ultimate, CALM) > score_skill(&strike, CALM));
    }

    #[test]
    fn finisher_bonus_needs_low_opponent() {
        let strike = SkillDefinition::strike(SkillId(1), "strike", 20);
        let finishing = Situation {
            own_health: 1.0,
            opponent_health: 0.2,
        };
        assert_eq!(score_skill(&strike, finishing), 20.0 + FINISHER_BONUS);
        assert_eq!(score_skill(&strike, CALM), 20.0);
    }

    #[test]
    fn heal_is_preferred_in_danger() {
        let mut mend = SkillDefinition::strike(SkillId(3), "mend", 0);
        mend.effects
            .push(EffectDescriptor::new(StatusKind::Heal, 20, 0).on_caster());
        let strike = SkillDefinition::strike(SkillId(1), "strike", 30);
        let danger = Situation {
            own_health: 0.2,
            opponent_health: 1.0,
        };

        assert!(score_skill(&mend, danger) > score_skill(&strike, danger));
        assert!(score_skill(&mend, CALM) < score_skill(&strike, CALM));
    }

    #[test]
    fn items_score_by_kind() {
        let danger = Situation {
            own_health: 0.1,
            opponent_health: 1.0,
        };
        let potion = item(ItemKind::Heal, 30);
        let bomb = item(
            ItemKind::Debuff {
                status: StatusKind::Burn,
                duration: 2,
            },
            5,
        );

        assert_eq!(score_item(&potion, CALM), 30.0);
        assert_eq!(score_item(&potion, danger), 30.0 + DEFENSIVE_BONUS);
        assert_eq!(score_item(&bomb, CALM), 5.0 + STATUS_BONUS);
    }
}
