//! Deferred event queue: the backbone keeping gameplay ordered with respect
//! to animation completion signals.
//!
//! Gameplay consequences (damage, phase changes) must not apply before the
//! animation depicting them reaches its meaningful point, yet the simulation
//! is single-threaded and cannot block. "Waiting" is therefore explicit
//! state: the queue arms only its head action, which either counts down a
//! tick delay or waits for a matching external signal. Everything behind the
//! head stays pending.

use std::collections::VecDeque;

use crate::events::BattleCommand;
use crate::state::{CardColor, CombatantId, ContextId};

/// External completion signals observed by the core.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Signal {
    /// An attack animation reached its impact frame; pending damage for
    /// `target` may land.
    AttackImpact {
        target: CombatantId,
        context: Option<ContextId>,
    },

    /// A buff/debuff animation finished.
    BuffAnimationDone { owner: CombatantId },

    /// An absorb (Aegis) animation finished.
    AbsorbAnimationDone { owner: CombatantId },

    /// A card was assigned as block against the given context.
    BlockAssigned { context: ContextId, amount: u32 },

    /// A card was played while the given context was the active target.
    CardPlayed { context: ContextId, color: CardColor },
}

/// Discriminant of [`Signal`], used by filters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SignalKind {
    AttackImpact,
    BuffAnimationDone,
    AbsorbAnimationDone,
    BlockAssigned,
    CardPlayed,
}

impl Signal {
    pub fn kind(&self) -> SignalKind {
        match self {
            Signal::AttackImpact { .. } => SignalKind::AttackImpact,
            Signal::BuffAnimationDone { .. } => SignalKind::BuffAnimationDone,
            Signal::AbsorbAnimationDone { .. } => SignalKind::AbsorbAnimationDone,
            Signal::BlockAssigned { .. } => SignalKind::BlockAssigned,
            Signal::CardPlayed { .. } => SignalKind::CardPlayed,
        }
    }

    fn context(&self) -> Option<ContextId> {
        match self {
            Signal::AttackImpact { context, .. } => *context,
            Signal::BlockAssigned { context, .. } | Signal::CardPlayed { context, .. } => {
                Some(*context)
            }
            _ => None,
        }
    }

    fn combatant(&self) -> Option<CombatantId> {
        match self {
            Signal::AttackImpact { target, .. } => Some(*target),
            Signal::BuffAnimationDone { owner } | Signal::AbsorbAnimationDone { owner } => {
                Some(*owner)
            }
            _ => None,
        }
    }
}

/// Typed predicate over signals.
///
/// Replaces the original's name-string matching: a wait completes when a
/// signal of the right kind arrives and every set field agrees with the
/// signal's payload.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SignalFilter {
    pub kind: SignalKind,
    pub context: Option<ContextId>,
    pub combatant: Option<CombatantId>,
}

impl SignalFilter {
    pub fn kind(kind: SignalKind) -> Self {
        Self {
            kind,
            context: None,
            combatant: None,
        }
    }

    pub fn with_context(mut self, context: ContextId) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_combatant(mut self, combatant: CombatantId) -> Self {
        self.combatant = Some(combatant);
        self
    }

    pub fn matches(&self, signal: &Signal) -> bool {
        if signal.kind() != self.kind {
            return false;
        }
        if let Some(expected) = self.context
            && signal.context() != Some(expected)
        {
            return false;
        }
        if let Some(expected) = self.combatant
            && signal.combatant() != Some(expected)
        {
            return false;
        }
        true
    }
}

/// How a queued action completes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Trigger {
    /// Completes after `remaining` ticks, decremented once per tick while
    /// this action is the head.
    Delay { remaining: u32 },

    /// Completes the instant a matching signal is observed.
    Wait { filter: SignalFilter },
}

/// One queued action: a trigger plus the command it releases.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueuedAction {
    pub trigger: Trigger,
    pub command: BattleCommand,
}

impl QueuedAction {
    pub fn after(ticks: u32, command: BattleCommand) -> Self {
        Self {
            trigger: Trigger::Delay { remaining: ticks },
            command,
        }
    }

    pub fn on(filter: SignalFilter, command: BattleCommand) -> Self {
        Self {
            trigger: Trigger::Wait { filter },
            command,
        }
    }
}

/// FIFO of queued actions, draining one at a time.
///
/// Within a tick, completed commands come out strictly in enqueue order; a
/// later delay can never overtake an earlier unresolved signal wait.
#[derive(Clone, Debug, Default)]
pub struct DeferredQueue {
    entries: VecDeque<QueuedAction>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends to the tail.
    pub fn enqueue(&mut self, action: QueuedAction) {
        self.entries.push_back(action);
    }

    /// Drops all pending actions without executing them.
    ///
    /// The only cancellation primitive: used when a battle ends abruptly so
    /// stale transitions cannot fire into the next battle.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Advances one tick: decrements the head's delay, then drains every
    /// consecutively ready head. Returned commands run in enqueue order.
    pub fn tick(&mut self) -> Vec<BattleCommand> {
        if let Some(QueuedAction {
            trigger: Trigger::Delay { remaining },
            ..
        }) = self.entries.front_mut()
        {
            *remaining = remaining.saturating_sub(1);
        }
        self.drain_ready()
    }

    /// Feeds an observed signal to the head. A matching wait completes
    /// immediately and deregisters; non-head waits are untouched.
    pub fn observe(&mut self, signal: &Signal) -> Vec<BattleCommand> {
        let matched = matches!(
            self.entries.front(),
            Some(QueuedAction {
                trigger: Trigger::Wait { filter },
                ..
            }) if filter.matches(signal)
        );
        if !matched {
            return Vec::new();
        }
        let mut completed: Vec<BattleCommand> = self
            .entries
            .pop_front()
            .map(|head| head.command)
            .into_iter()
            .collect();
        completed.extend(self.drain_ready());
        completed
    }

    /// Pops every head whose delay has already elapsed. Stops at the first
    /// signal wait or unelapsed delay.
    fn drain_ready(&mut self) -> Vec<BattleCommand> {
        let mut completed = Vec::new();
        while matches!(
            self.entries.front(),
            Some(QueuedAction {
                trigger: Trigger::Delay { remaining: 0 },
                ..
            })
        ) {
            if let Some(head) = self.entries.pop_front() {
                completed.push(head.command);
            }
        }
        completed
    }
}
