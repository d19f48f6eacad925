//! Per-match event broadcasting.
//!
//! Workers publish every accepted state transition here; clients subscribe
//! by [`MatchId`](battle_core::MatchId) and receive updates in log order.
mod bus;

pub use bus::{EventBus, MatchEvent, MatchSummary, MatchUpdate, StatePublisher};
