//! Planned enemy attacks and the per-enemy intent queues.

use arrayvec::ArrayVec;

use super::common::{AttackId, ContextId};
use crate::config::BattleConfig;

/// One queued enemy action, created by the intent planner.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlannedAttack {
    /// Content definition this attack instantiates.
    pub attack: AttackId,

    /// Correlation key for the progress record and resolution signals.
    pub context: ContextId,

    /// 1-based order within the turn.
    pub resolve_step: u8,

    /// Captured from the definition at planning time so the damage pipeline
    /// never needs a second content lookup.
    pub base_damage: u32,

    /// Set at resolution by the condition evaluator.
    pub was_blocked: bool,

    /// Set by stun interaction; a stunned entry is skipped, never resolved.
    pub is_stunned: bool,

    /// Rolled at planning time; resolves with compressed warning time.
    pub is_ambush: bool,
}

impl PlannedAttack {
    pub fn new(attack: AttackId, context: ContextId, resolve_step: u8, base_damage: u32) -> Self {
        Self {
            attack,
            context,
            resolve_step,
            base_damage,
            was_blocked: true,
            is_stunned: false,
            is_ambush: false,
        }
    }

    pub fn with_ambush(mut self, is_ambush: bool) -> Self {
        self.is_ambush = is_ambush;
        self
    }
}

/// A bounded queue of planned attacks, consumed front-to-back.
pub type IntentQueue = ArrayVec<PlannedAttack, { BattleConfig::MAX_PLANNED_ATTACKS }>;

/// This turn's attacks plus the telegraphed preview for the next turn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntentQueues {
    /// Consumed front-to-back over the EnemyAttack sub-phases.
    pub current: IntentQueue,

    /// Telegraphed preview, promoted to `current` when the latter is empty
    /// and a new enemy turn starts.
    pub next: IntentQueue,
}

impl IntentQueues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves every `next` entry into `current`, preserving order.
    ///
    /// Callers promote only when `current` is empty; promoting onto leftover
    /// entries would interleave two turns' worth of intents.
    pub fn promote(&mut self) {
        debug_assert!(self.current.is_empty());
        let next = core::mem::take(&mut self.next);
        self.current = next;
    }

    /// The attack currently at the front of this turn's queue.
    pub fn front(&self) -> Option<&PlannedAttack> {
        self.current.first()
    }

    /// Removes and returns the front attack of this turn's queue.
    pub fn pop_front(&mut self) -> Option<PlannedAttack> {
        if self.current.is_empty() {
            None
        } else {
            Some(self.current.remove(0))
        }
    }

    /// Looks up a planned attack in either queue by its context id.
    pub fn find(&self, context: ContextId) -> Option<&PlannedAttack> {
        self.current
            .iter()
            .chain(self.next.iter())
            .find(|p| p.context == context)
    }

    pub fn find_mut(&mut self, context: ContextId) -> Option<&mut PlannedAttack> {
        self.current
            .iter_mut()
            .chain(self.next.iter_mut())
            .find(|p| p.context == context)
    }
}
