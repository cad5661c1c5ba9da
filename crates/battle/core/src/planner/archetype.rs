//! Per-archetype turn-selection strategies.
//!
//! A strategy is a pure function `(roster, turn) → ordered attack ids`.
//! Archetypes differ only in this function; the set is fixed and known at
//! compile time, so it is a closed enum rather than string-dispatched
//! behavior.

use crate::config::BattleConfig;
use crate::state::{AttackId, TurnNumber};

/// Enemy turn-selection archetype.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Archetype {
    /// Cycles through the roster, one attack per turn.
    Pattern,

    /// Cycles the first half of the roster until `switch_at`, the second
    /// half from that turn on.
    Threshold { switch_at: TurnNumber },

    /// Cycles the roster, adding one extra attack every `ramp_every` turns.
    Frenzy { ramp_every: TurnNumber },
}

impl Archetype {
    /// Selects this turn's attacks. `turn` is 1-based (the counter the
    /// phase machine maintains).
    pub fn plan(&self, roster: &[AttackId], turn: TurnNumber) -> Vec<AttackId> {
        if roster.is_empty() {
            return Vec::new();
        }
        let step = turn.max(1) - 1;
        match *self {
            Archetype::Pattern => {
                vec![roster[step as usize % roster.len()].clone()]
            }
            Archetype::Threshold { switch_at } => {
                let half = roster.len().div_ceil(2);
                let (set, offset) = if turn < switch_at || roster.len() < 2 {
                    (&roster[..half], 0)
                } else {
                    (&roster[half..], switch_at.max(1) - 1)
                };
                vec![set[(step - offset.min(step)) as usize % set.len()].clone()]
            }
            Archetype::Frenzy { ramp_every } => {
                let count = 1 + (step / ramp_every.max(1)) as usize;
                let count = count.min(BattleConfig::MAX_PLANNED_ATTACKS);
                (0..count)
                    .map(|j| roster[(step as usize + j) % roster.len()].clone())
                    .collect()
            }
        }
    }
}
