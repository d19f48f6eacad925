//! Difficulty-dependent selection among scored candidates.

use std::cmp::Ordering;

use battle_core::Difficulty;
use rand::Rng;

use super::ScoredCandidate;

/// Size of the pool sampled when the bot explores.
pub const TOP_K: usize = 3;

/// Probability of sampling uniformly among the top candidates instead of
/// taking the best one.
pub const fn exploration_rate(difficulty: Difficulty) -> f64 {
    match difficulty {
        Difficulty::Easy => 0.4,
        Difficulty::Normal => 0.2,
        Difficulty::Hard => 0.05,
    }
}

/// Picks a candidate. Ties keep generation order.
pub fn select<R: Rng>(
    mut scored: Vec<ScoredCandidate>,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<ScoredCandidate> {
    if scored.is_empty() {
        return None;
    }
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    let index = if rng.gen_bool(exploration_rate(difficulty)) {
        rng.gen_range(0..scored.len().min(TOP_K))
    } else {
        0
    };
    Some(scored.swap_remove(index))
}

#[cfg(test)]
mod tests {
    use battle_core::SkillId;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::providers::ai::Candidate;

    fn scored(id: u32, score: f64) -> ScoredCandidate {
        ScoredCandidate {
            candidate: Candidate::Skill(SkillId(id)),
            score,
        }
    }

    fn pick_rate(difficulty: Difficulty, trials: usize) -> f64 {
        let mut rng = StdRng::seed_from_u64(7);
        let best = (0..trials)
            .filter(|_| {
                let pool = vec![scored(1, 10.0), scored(2, 40.0), scored(3, 25.0), scored(4, 5.0)];
                select(pool, difficulty, &mut rng).map(|s| s.candidate)
                    == Some(Candidate::Skill(SkillId(2)))
            })
            .count();
        best as f64 / trials as f64
    }

    #[test]
    fn empty_pool_selects_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(select(Vec::new(), Difficulty::Hard, &mut rng).is_none());
    }

    #[test]
    fn harder_bots_pick_the_best_more_often() {
        let easy = pick_rate(Difficulty::Easy, 2000);
        let hard = pick_rate(Difficulty::Hard, 2000);
        assert!(hard >= 0.95, "hard picked best {hard}");
        assert!(easy < hard);
        assert!(easy > 0.6, "easy picked best {easy}");
    }

    #[test]
    fn exploration_stays_within_top_three() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..500 {
            let pool = vec![scored(1, 10.0), scored(2, 40.0), scored(3, 25.0), scored(4, 5.0)];
            let pick = select(pool, Difficulty::Easy, &mut rng).unwrap();
            assert_ne!(pick.candidate, Candidate::Skill(SkillId(4)));
        }
    }
}
