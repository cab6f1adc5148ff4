/// Simulation constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Number of boss actions a roster must survive for the run to succeed.
    pub boss_turn_limit: u32,

    /// Boss loadout slot whose use can be averted by an ally's passive.
    pub averting_slot: usize,

    /// Upper bound on consecutive extra turns taken by allies without the
    /// timeline advancing.
    pub max_chained_turns: u32,
}

impl SimConfig {
    // ===== engine constants =====
    /// Turn meter an entity needs before it may act.
    pub const TURN_METER_THRESHOLD: f64 = 100.0;
    /// Fraction of effective speed added to the turn meter each tick.
    pub const TURN_METER_TICK_MULTIPLIER: f64 = 0.07;
    /// Turn meter assigned by an extra-turn effect.
    pub const EXTRA_TURN_METER: f64 = 1.0e6;
    pub const SPEED_INCREASE_MULTIPLIER: f64 = 1.3;
    pub const SPEED_DECREASE_MULTIPLIER: f64 = 0.85;
    /// Capacity of a single buff or debuff ledger.
    pub const MAX_STATUS_EFFECTS: usize = 4;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_BOSS_TURN_LIMIT: u32 = 50;
    pub const DEFAULT_AVERTING_SLOT: usize = 0;
    pub const DEFAULT_MAX_CHAINED_TURNS: u32 = 10_000;

    pub fn new() -> Self {
        Self {
            boss_turn_limit: Self::DEFAULT_BOSS_TURN_LIMIT,
            averting_slot: Self::DEFAULT_AVERTING_SLOT,
            max_chained_turns: Self::DEFAULT_MAX_CHAINED_TURNS,
        }
    }

    pub fn with_boss_turn_limit(mut self, boss_turn_limit: u32) -> Self {
        self.boss_turn_limit = boss_turn_limit;
        self
    }

    pub fn with_averting_slot(mut self, averting_slot: usize) -> Self {
        self.averting_slot = averting_slot;
        self
    }

    pub fn with_max_chained_turns(mut self, max_chained_turns: u32) -> Self {
        self.max_chained_turns = max_chained_turns;
        self
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}
