//! Battle phase state.
//!
//! The sub-phase enum is the single source of truth; the main phase is
//! derived from it. Only [`crate::machine::PhaseMachine`] mutates
//! [`PhaseState`], in response to transition commands drained from the
//! deferred queue.

use super::common::TurnNumber;

/// Which side the current sub-phase belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MainPhase {
    PlayerTurn,
    EnemyTurn,
}

/// Ordered battle sub-phases.
///
/// The nominal cycle is `EnemyStart → PreBlock → Block → EnemyAttack*
/// → EnemyEnd → PlayerStart → Action → PlayerEnd → EnemyStart`, with
/// `StartBattle` as the reset/initial state. `EnemyAttack` repeats once per
/// planned attack.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SubPhase {
    StartBattle,
    EnemyStart,
    PreBlock,
    Block,
    EnemyAttack,
    EnemyEnd,
    PlayerStart,
    Action,
    PlayerEnd,
}

impl SubPhase {
    /// Main phase this sub-phase belongs to.
    ///
    /// `StartBattle` counts as the enemy turn: the cycle opens on the enemy
    /// side and the player cannot act yet.
    pub const fn main(self) -> MainPhase {
        match self {
            SubPhase::StartBattle
            | SubPhase::EnemyStart
            | SubPhase::PreBlock
            | SubPhase::Block
            | SubPhase::EnemyAttack
            | SubPhase::EnemyEnd => MainPhase::EnemyTurn,
            SubPhase::PlayerStart | SubPhase::Action | SubPhase::PlayerEnd => {
                MainPhase::PlayerTurn
            }
        }
    }
}

/// Singleton phase state for one battle.
///
/// Lives for the duration of one battle; [`PhaseState::reset`] returns it to
/// `StartBattle` / turn 0 when a new battle begins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseState {
    /// Current sub-phase.
    pub sub: SubPhase,

    /// Monotonic counter, incremented once per full cycle (on entry to
    /// `EnemyStart`).
    pub turn: TurnNumber,
}

impl PhaseState {
    pub fn new() -> Self {
        Self {
            sub: SubPhase::StartBattle,
            turn: 0,
        }
    }

    /// Derived main phase.
    #[inline]
    pub fn main(&self) -> MainPhase {
        self.sub.main()
    }

    /// Returns to the initial state for a fresh battle.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for PhaseState {
    fn default() -> Self {
        Self::new()
    }
}
