//! Deterministic environment facts consumed by the combat pipeline.
//!
//! The only environmental input the rules need is randomness, and it must be
//! reproducible: every roll is derived from the match seed, the event index
//! and a per-roll context so replaying a match yields identical outcomes.
mod rng;

pub use rng::{PcgRng, RngOracle, Rolls, compute_seed};
