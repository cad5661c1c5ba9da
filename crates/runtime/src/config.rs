use std::time::Duration;

use battle_core::BattleConfig;

/// Runtime configuration for the battle worker.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    /// Core pacing configuration, forwarded to the director.
    pub battle: BattleConfig,

    /// Wall-clock interval between director ticks.
    pub tick_interval: Duration,

    /// Capacity of the command channel feeding the worker.
    pub command_capacity: usize,

    /// Per-topic capacity of the broadcast event bus.
    pub event_capacity: usize,
}

impl RuntimeConfig {
    /// The original presentation ticked at 60 Hz.
    pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(16);

    pub fn new() -> Self {
        Self {
            battle: BattleConfig::new(),
            tick_interval: Self::DEFAULT_TICK_INTERVAL,
            command_capacity: 64,
            event_capacity: 256,
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new()
    }
}
