/// Battle configuration constants and tunable pacing parameters.
///
/// Delays are expressed in logic ticks. The core never reads a wall clock;
/// the host decides how often [`crate::director::BattleDirector::tick`] runs
/// (the original presentation drove it at 60 Hz).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleConfig {
    /// Delay between battle start and the first EnemyStart transition.
    pub start_delay_ticks: u32,

    /// Delay between the links of an internally generated phase chain
    /// (e.g. the EnemyEnd → PlayerStart → Action chain after a fully
    /// stunned enemy turn). Zero means the links fire back-to-back.
    pub chain_step_ticks: u32,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum planned attacks per enemy per turn.
    pub const MAX_PLANNED_ATTACKS: usize = 8;
    /// Maximum enemies in one battle.
    pub const MAX_ENEMIES: usize = 4;

    // ===== runtime-tunable defaults =====
    /// Two seconds at the original 60 Hz presentation tick rate.
    pub const DEFAULT_START_DELAY_TICKS: u32 = 120;
    pub const DEFAULT_CHAIN_STEP_TICKS: u32 = 0;

    pub fn new() -> Self {
        Self {
            start_delay_ticks: Self::DEFAULT_START_DELAY_TICKS,
            chain_step_ticks: Self::DEFAULT_CHAIN_STEP_TICKS,
        }
    }

    /// Config with no pacing delays, useful for tests that step the
    /// director tick-by-tick.
    pub fn immediate() -> Self {
        Self {
            start_delay_ticks: 0,
            chain_step_ticks: 0,
        }
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
