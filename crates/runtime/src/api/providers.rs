//! Asynchronous abstraction for sourcing bot intent.
//!
//! Bot-controlled sides obtain their next action from an [`ActionProvider`]
//! so the rule-based decision engine can be swapped for scripted fixtures.
use async_trait::async_trait;
use battle_core::{MatchState, PlayerAction, SideId};

use super::errors::Result;

/// Trait for choosing an action for a side given a state snapshot.
#[async_trait]
pub trait ActionProvider: Send + Sync {
    /// Provide an action for `side` based on the current match state.
    ///
    /// The returned action is submitted against the version of `state`, so
    /// a decision made on a snapshot that has since moved on is rejected as
    /// stale rather than applied.
    async fn provide_action(&self, side: SideId, state: &MatchState) -> Result<PlayerAction>;
}

/// Always ends the turn. Useful for testing or as a fallback.
pub struct EndTurnProvider;

#[async_trait]
impl ActionProvider for EndTurnProvider {
    async fn provide_action(&self, side: SideId, _state: &MatchState) -> Result<PlayerAction> {
        Ok(PlayerAction::end_turn(side))
    }
}
