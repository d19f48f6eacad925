//! RON match scenarios.
//!
//! A scenario is a [`MatchSetup`] without the match identifier, so the same
//! file can seed any number of matches. Roster validation still happens in
//! [`MatchState::from_setup`](battle_core::MatchState::from_setup) when the
//! match is created.

use std::path::Path;

use battle_core::{BattleConfig, ComboDefinition, EventFlags, MatchId, MatchSetup, SideSetup};
use serde::{Deserialize, Serialize};

use crate::api::{Result, RuntimeError};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,
    pub seed: u64,
    #[serde(default)]
    pub config: BattleConfig,
    #[serde(default)]
    pub combos: Vec<ComboDefinition>,
    #[serde(default)]
    pub events: EventFlags,
    pub side_a: SideSetup,
    pub side_b: SideSetup,
}

impl Scenario {
    /// Load scenario from RON file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            RuntimeError::InvalidConfig(format!("Failed to read scenario file: {}", e))
        })?;

        let scenario = Self::from_ron_str(&content)?;
        tracing::info!(
            "Loaded scenario '{}' from {}",
            scenario.name,
            path.display()
        );
        Ok(scenario)
    }

    pub fn from_ron_str(content: &str) -> Result<Self> {
        ron::from_str(content).map_err(|e| {
            RuntimeError::InvalidConfig(format!("Failed to parse scenario RON: {}", e))
        })
    }

    /// Binds the scenario to a match identifier.
    pub fn into_setup(self, id: MatchId) -> MatchSetup {
        MatchSetup {
            id,
            seed: self.seed,
            config: self.config,
            combos: self.combos,
            events: self.events,
            side_a: self.side_a,
            side_b: self.side_b,
        }
    }
}
