//! Rule-based [`ActionProvider`] for bot-controlled sides.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use battle_core::{Controller, Difficulty, MatchState, PlayerAction, SideId};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use super::scoring::score_candidate;
use super::{ActionCandidateGenerator, AiContext, select};
use crate::api::{ActionProvider, Result};

/// Decision engine backed by the scoring table and the difficulty-aware
/// selector.
///
/// Selection randomness comes from a seeded [`StdRng`], so a fixed seed and
/// the same sequence of states yield the same decisions.
pub struct DecisionEngineProvider {
    rng: Mutex<StdRng>,
}

impl DecisionEngineProvider {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Synchronous decision for `side` on `state`.
    pub fn decide(&self, side: SideId, state: &MatchState) -> PlayerAction {
        let difficulty = match state.side(side).controller {
            Controller::Bot { difficulty } => difficulty,
            Controller::Human => Difficulty::default(),
        };
        let ctx = AiContext::new(side, state, difficulty);

        let scored: Vec<_> = ActionCandidateGenerator::generate(&ctx)
            .into_iter()
            .filter_map(|candidate| score_candidate(&ctx, candidate))
            .collect();
        let candidates = scored.len();

        let choice = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            select(scored, difficulty, &mut *rng)
        };

        match choice {
            Some(choice) => {
                debug!(
                    target: "runtime::ai",
                    match_id = %state.id,
                    %side,
                    %difficulty,
                    candidates,
                    choice = ?choice.candidate,
                    score = choice.score,
                    "bot decision",
                );
                PlayerAction::new(side, choice.candidate.action_kind())
            }
            None => {
                debug!(
                    target: "runtime::ai",
                    match_id = %state.id,
                    %side,
                    "no candidates, ending turn",
                );
                PlayerAction::end_turn(side)
            }
        }
    }
}

impl Default for DecisionEngineProvider {
    fn default() -> Self {
        Self::new(0)
    }
}

#[async_trait]
impl ActionProvider for DecisionEngineProvider {
    async fn provide_action(&self, side: SideId, state: &MatchState) -> Result<PlayerAction> {
        Ok(self.decide(side, state))
    }
}
