//! Rule-based decision engine for bot-controlled sides.
//!
//! One decision per bot-owned turn, in four steps:
//!
//! 1. **Context**: snapshot of both sides plus the legal actions, computed
//!    once through the core validator ([`AiContext`]).
//! 2. **Candidates**: lead swaps during the lead window, otherwise skill
//!    and item uses ([`ActionCandidateGenerator`]).
//! 3. **Scoring**: a fixed utility table ([`score_candidate`]).
//! 4. **Selection**: best score, with a difficulty-dependent chance of
//!    sampling among the top three instead ([`select`]).
//!
//! No candidate means an explicit end of turn.

pub mod context;
pub mod generator;
pub mod provider;
pub mod scoring;
pub mod selector;

pub use context::AiContext;
pub use generator::{ActionCandidateGenerator, Candidate};
pub use provider::DecisionEngineProvider;
pub use scoring::{ScoredCandidate, score_candidate};
pub use selector::{TOP_K, exploration_rate, select};
