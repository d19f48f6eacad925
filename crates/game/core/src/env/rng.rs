//! RNG oracle for deterministic random number generation.
//!
//! Battle mechanics that look random (dodge, critical hits, status chances)
//! are pure functions of a seed. Given the same seed, every implementation
//! must produce the same sequence, which is what makes `combat::resolve`
//! replayable and testable.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Returns a uniform value in `[0, 1)`.
    fn unit_interval(&self, seed: u64) -> f64 {
        self.next_u32(seed) as f64 / (u32::MAX as f64 + 1.0)
    }

    /// Returns true with the given probability.
    ///
    /// Probabilities at or below 0 never succeed and at or above 1 always do,
    /// without consuming any entropy-dependent branch.
    fn chance(&self, seed: u64, probability: f64) -> bool {
        if probability <= 0.0 {
            return false;
        }
        if probability >= 1.0 {
            return true;
        }
        self.unit_interval(seed) < probability
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 32-bit output from 64-bit state. Single multiply, xorshift
/// and rotate; stateless here because every roll carries its own seed.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = Self::pcg_step(seed);
        Self::pcg_output(state)
    }
}

/// Compute deterministic seed from match state components.
///
/// # Arguments
///
/// * `match_seed` - Base seed set at match creation
/// * `nonce` - Event index (number of log entries before this action)
/// * `actor` - Numeric tag of the acting side
/// * `context` - Distinguishes several rolls inside one action
pub fn compute_seed(match_seed: u64, nonce: u64, actor: u32, context: u32) -> u64 {
    // SplitMix64 / FxHash multipliers
    let mut hash = match_seed;

    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// A sequence of independent rolls for a single action.
///
/// Each call consumes the next context value, so the order in which the
/// combat pipeline asks for rolls (dodge, then crit, then each effect) is
/// part of the deterministic contract.
#[derive(Debug)]
pub struct Rolls<'a, R: RngOracle + ?Sized> {
    oracle: &'a R,
    match_seed: u64,
    nonce: u64,
    actor: u32,
    context: u32,
}

impl<'a, R: RngOracle + ?Sized> Rolls<'a, R> {
    pub fn new(oracle: &'a R, match_seed: u64, nonce: u64, actor: u32) -> Self {
        Self {
            oracle,
            match_seed,
            nonce,
            actor,
            context: 0,
        }
    }

    /// Rolls the next independent chance.
    pub fn chance(&mut self, probability: f64) -> bool {
        let seed = compute_seed(self.match_seed, self.nonce, self.actor, self.context);
        self.context += 1;
        self.oracle.chance(seed, probability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_value() {
        let rng = PcgRng;
        assert_eq!(rng.next_u32(42), rng.next_u32(42));
        assert_ne!(rng.next_u32(42), rng.next_u32(43));
    }

    #[test]
    fn chance_respects_bounds() {
        let rng = PcgRng;
        for seed in 0..200 {
            assert!(!rng.chance(seed, 0.0));
            assert!(rng.chance(seed, 1.0));
        }
    }

    #[test]
    fn chance_frequency_is_close_to_probability() {
        let rng = PcgRng;
        let hits = (0..10_000u64)
            .filter(|&i| rng.chance(compute_seed(7, i, 0, 0), 0.25))
            .count();
        assert!((2_200..2_800).contains(&hits), "hits = {hits}");
    }

    #[test]
    fn rolls_are_reproducible() {
        let rng = PcgRng;
        let mut a = Rolls::new(&rng, 99, 3, 1);
        let mut b = Rolls::new(&rng, 99, 3, 1);
        let seq_a: Vec<bool> = (0..32).map(|_| a.chance(0.5)).collect();
        let seq_b: Vec<bool> = (0..32).map(|_| b.chance(0.5)).collect();
        assert_eq!(seq_a, seq_b);
    }
}
