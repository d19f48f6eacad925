//! Turns the legal action list into decision candidates.

use battle_core::{ActionKind, ItemId, Phase, SkillId, UnitId, UnitState};
use tracing::debug;

use super::AiContext;

/// A bench unit must be this much stronger than the lead to be swapped in.
pub const SWAP_THRESHOLD: f64 = 1.2;

/// A concrete action the bot may choose.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Candidate {
    Skill(SkillId),
    Item(ItemId),
    /// Lead swap with the strength ratio of incoming over current lead.
    Swap { unit: UnitId, ratio: f64 },
}

impl Candidate {
    pub fn action_kind(&self) -> ActionKind {
        match *self {
            Candidate::Skill(skill) => ActionKind::UseSkill { skill },
            Candidate::Item(item) => ActionKind::UseItem { item },
            Candidate::Swap { unit, .. } => ActionKind::SwitchActive { unit },
        }
    }
}

/// Rough combat value of a unit: stats weighted by remaining health.
pub fn unit_strength(unit: &UnitState) -> f64 {
    (unit.effective_attack() + unit.effective_defense()) * unit.health_fraction()
}

pub struct ActionCandidateGenerator;

impl ActionCandidateGenerator {
    /// Generates candidates for the current phase.
    ///
    /// During the lead window only meaningfully stronger bench units are
    /// offered; if none qualifies the bot proceeds as in ACTION. Voluntary
    /// switches outside the lead window are never generated since they end
    /// the turn.
    pub fn generate(ctx: &AiContext<'_>) -> Vec<Candidate> {
        if ctx.phase() == Phase::Init && ctx.own().lead_pending {
            let swaps = Self::lead_swaps(ctx);
            if !swaps.is_empty() {
                debug!(
                    target: "runtime::ai",
                    side = %ctx.side,
                    swaps = swaps.len(),
                    "lead swap candidates",
                );
                return swaps;
            }
        }

        ctx.available_actions()
            .iter()
            .filter_map(|kind| match *kind {
                ActionKind::UseSkill { skill } => Some(Candidate::Skill(skill)),
                ActionKind::UseItem { item } => Some(Candidate::Item(item)),
                ActionKind::SwitchActive { .. } | ActionKind::EndTurn => None,
            })
            .collect()
    }

    fn lead_swaps(ctx: &AiContext<'_>) -> Vec<Candidate> {
        let current = unit_strength(ctx.own_active());
        let own = ctx.own();

        ctx.available_actions()
            .iter()
            .filter_map(|kind| match *kind {
                ActionKind::SwitchActive { unit } => Some(unit),
                _ => None,
            })
            .filter_map(|unit| {
                let incoming = own.bench_position(unit).and_then(|pos| own.bench_unit(pos))?;
                let strength = unit_strength(incoming);
                let ratio = if current > 0.0 {
                    strength / current
                } else {
                    f64::INFINITY
                };
                (ratio >= SWAP_THRESHOLD).then_some(Candidate::Swap { unit, ratio })
            })
            .collect()
    }
}
