use super::{MatchVersion, SideId};

/// Phases of a single turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Pre-turn. Held for lead selection on a side's first turn.
    #[default]
    Init,
    /// The owner may submit exactly one action.
    Action,
    /// Engine-only: apply outcome, tick statuses, check for a winner.
    Resolution,
    /// Engine-only: draw, hand off ownership, advance the turn number.
    EndTurn,
}

/// Turn bookkeeping for the phase machine.
///
/// `step` counts phase transitions inside the current turn and resets when
/// the turn number advances, so `(number, step)` is a strictly increasing
/// version of the match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    /// Monotonic, starts at 0.
    pub number: u32,
    pub step: u32,
    pub phase: Phase,
    pub owner: SideId,
}

impl TurnState {
    /// Turn 0, side A, INIT.
    pub fn new() -> Self {
        Self {
            number: 0,
            step: 0,
            phase: Phase::Init,
            owner: SideId::A,
        }
    }

    pub fn version(&self) -> MatchVersion {
        MatchVersion::new(self.number, self.step)
    }

    /// Moves to `phase` within the current turn.
    pub fn enter(&mut self, phase: Phase) {
        self.phase = phase;
        self.step += 1;
    }

    /// Advances the step without changing phase.
    pub fn bump(&mut self) {
        self.step += 1;
    }

    /// Hands the turn to the other side and starts it in INIT.
    pub fn hand_off(&mut self) {
        self.owner = self.owner.opponent();
        self.number += 1;
        self.step = 0;
        self.phase = Phase::Init;
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versions_increase_across_phases_and_turns() {
        let mut turn = TurnState::new();
        let mut last = turn.version();
        for phase in [Phase::Action, Phase::Resolution, Phase::EndTurn] {
            turn.enter(phase);
            assert!(turn.version() > last);
            last = turn.version();
        }
        turn.hand_off();
        assert!(turn.version() > last);
        assert_eq!(turn.owner, SideId::B);
        assert_eq!(turn.phase, Phase::Init);
    }
}
