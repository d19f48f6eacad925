//! Match orchestration for the battle engine.
//!
//! This crate wires the deterministic rules of `battle-core` into concurrent
//! match workers. Consumers embed [`Runtime`] to create matches, submit
//! versioned actions through [`MatchHandle`], and follow each match through
//! the [`EventBus`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the match registry and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the per-match event bus
//! - [`providers`] hosts the bot decision engine
//! - [`scenario`] loads match setups from RON
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod providers;
pub mod runtime;
pub mod scenario;

mod workers;

pub use api::{
    Accepted, ActionProvider, EndTurnProvider, ErrorKind, MatchHandle, Rejection, Result,
    RuntimeError, SubmissionResponse,
};
pub use events::{EventBus, MatchEvent, MatchSummary, MatchUpdate, StatePublisher};
pub use providers::DecisionEngineProvider;
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use scenario::Scenario;
