//! Phase state machine.
//!
//! Transitions are never applied directly by gameplay code; they arrive as
//! [`crate::events::BattleCommand::Transition`] commands drained from the
//! deferred queue, so downstream effects cannot race ahead of their
//! animations. The machine's only public side effect is reporting "phase
//! changed" with (previous, current); all reactive behavior lives in the
//! director's hooks, keeping the machine trivial and testable in isolation.

use crate::state::{PhaseState, SubPhase, TurnNumber};

/// Result of applying one transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseChange {
    pub previous: SubPhase,
    pub current: SubPhase,
    pub turn: TurnNumber,
}

/// Authoritative writer for [`PhaseState`].
pub struct PhaseMachine<'a> {
    state: &'a mut PhaseState,
}

impl<'a> PhaseMachine<'a> {
    pub fn new(state: &'a mut PhaseState) -> Self {
        Self { state }
    }

    /// Applies a requested transition and returns the change to broadcast.
    ///
    /// The turn counter increments exactly once per cycle, on entry to
    /// `EnemyStart`.
    pub fn apply(&mut self, next: SubPhase) -> PhaseChange {
        let previous = self.state.sub;
        if next == SubPhase::EnemyStart {
            self.state.turn += 1;
        }
        self.state.sub = next;
        PhaseChange {
            previous,
            current: next,
            turn: self.state.turn,
        }
    }

    /// Returns to `StartBattle` / turn 0 for a fresh battle.
    pub fn reset(&mut self) {
        self.state.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MainPhase;
    use strum::IntoEnumIterator;

    /// The nominal cycle after StartBattle, EnemyAttack repeated per attack.
    const CYCLE: [SubPhase; 8] = [
        SubPhase::EnemyStart,
        SubPhase::PreBlock,
        SubPhase::Block,
        SubPhase::EnemyAttack,
        SubPhase::EnemyEnd,
        SubPhase::PlayerStart,
        SubPhase::Action,
        SubPhase::PlayerEnd,
    ];

    #[test]
    fn turn_increments_exactly_once_per_cycle() {
        let mut state = PhaseState::new();
        let mut machine = PhaseMachine::new(&mut state);

        for expected_turn in 1..=3 {
            for sub in CYCLE {
                let change = machine.apply(sub);
                assert_eq!(change.current, sub);
                assert_eq!(change.turn, expected_turn);
            }
        }
    }

    #[test]
    fn sub_phase_stays_within_the_declared_enum() {
        // Arbitrary transition requests: turn only moves on EnemyStart and
        // the sub-phase is whatever was requested, never anything else.
        let mut state = PhaseState::new();
        let mut machine = PhaseMachine::new(&mut state);
        let requests = [
            SubPhase::Action,
            SubPhase::EnemyStart,
            SubPhase::EnemyStart,
            SubPhase::PlayerEnd,
            SubPhase::Block,
        ];
        for sub in requests {
            let change = machine.apply(sub);
            assert!(SubPhase::iter().any(|s| s == change.current));
        }
        assert_eq!(state.turn, 2);
    }

    #[test]
    fn main_phase_tracks_the_sub_phase() {
        let mut state = PhaseState::new();
        assert_eq!(state.main(), MainPhase::EnemyTurn);

        let mut machine = PhaseMachine::new(&mut state);
        machine.apply(SubPhase::PlayerStart);
        assert_eq!(state.main(), MainPhase::PlayerTurn);
    }

    #[test]
    fn reset_returns_to_start_battle() {
        let mut state = PhaseState::new();
        let mut machine = PhaseMachine::new(&mut state);
        machine.apply(SubPhase::EnemyStart);
        machine.apply(SubPhase::Block);
        machine.reset();
        assert_eq!(state.sub, SubPhase::StartBattle);
        assert_eq!(state.turn, 0);
    }
}
