/// Battle configuration constants and tunable parameters.
///
/// Capacities are compile-time constants because they size the fixed
/// arrays inside [`crate::state::SideState`]; the remaining fields are
/// balance knobs that a match setup may override.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleConfig {
    /// Baseline critical-hit probability before passive bonuses.
    pub crit_chance: f64,

    /// Multiplier when another living ally shares the attacker's region.
    pub regional_multiplier: f64,

    /// Multiplier when the attacker's element is strong against the defender's.
    pub elemental_multiplier: f64,

    /// Multiplier for night-tagged attackers while a lunar event is active.
    pub lunar_multiplier: f64,

    /// Multiplier for attackers flagged as counter-attacking.
    pub counter_multiplier: f64,

    /// Resource every unit starts the match with.
    pub starting_resource: u32,

    /// Resource regained by the acting unit at the end of its owner's turn.
    pub resource_per_turn: u32,

    /// Resource ceiling.
    pub max_resource: u32,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// Units per roster (one active plus the bench).
    pub const ROSTER_SIZE: usize = 5;
    /// Bench slots per side.
    pub const BENCH_CAPACITY: usize = 4;
    /// Items a side may hold at once.
    pub const HAND_CAPACITY: usize = 3;
    /// Concurrent status effects per unit.
    pub const MAX_STATUS_EFFECTS: usize = 8;
    /// Skills per unit.
    pub const MAX_SKILLS: usize = 6;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_CRIT_CHANCE: f64 = 0.10;
    pub const DEFAULT_REGIONAL_MULTIPLIER: f64 = 1.25;
    pub const DEFAULT_ELEMENTAL_MULTIPLIER: f64 = 1.5;
    pub const DEFAULT_LUNAR_MULTIPLIER: f64 = 2.0;
    pub const DEFAULT_COUNTER_MULTIPLIER: f64 = 1.3;
    pub const DEFAULT_STARTING_RESOURCE: u32 = 2;
    pub const DEFAULT_RESOURCE_PER_TURN: u32 = 1;
    pub const DEFAULT_MAX_RESOURCE: u32 = 10;

    pub fn new() -> Self {
        Self {
            crit_chance: Self::DEFAULT_CRIT_CHANCE,
            regional_multiplier: Self::DEFAULT_REGIONAL_MULTIPLIER,
            elemental_multiplier: Self::DEFAULT_ELEMENTAL_MULTIPLIER,
            lunar_multiplier: Self::DEFAULT_LUNAR_MULTIPLIER,
            counter_multiplier: Self::DEFAULT_COUNTER_MULTIPLIER,
            starting_resource: Self::DEFAULT_STARTING_RESOURCE,
            resource_per_turn: Self::DEFAULT_RESOURCE_PER_TURN,
            max_resource: Self::DEFAULT_MAX_RESOURCE,
        }
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
