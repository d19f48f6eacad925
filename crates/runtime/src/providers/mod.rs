//! Action provider implementations for bot-controlled sides.

pub mod ai;

pub use ai::DecisionEngineProvider;
