//! Commands executed by the director and notifications it publishes.
//!
//! Commands are the payloads of queued actions: deferring a command behind a
//! delay or a signal wait is how gameplay stays ordered with respect to
//! presentation. Notifications are the core's only outbound surface; the
//! host fans them out however it likes.

use crate::state::{
    AttackId, CombatantId, ContextId, HitKind, PassiveKind, PassiveOwner, SubPhase, TurnNumber,
};

/// A deferred gameplay effect.
///
/// Every state mutation the queue can carry is named here; there are no
/// callback closures, so queue contents stay inspectable and deterministic.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleCommand {
    /// Move the phase machine to `sub`.
    Transition(SubPhase),

    /// Resolve the planned attack with this context id.
    Resolve(ContextId),

    /// Accumulate a pending hit against `target`, released by the matching
    /// impact signal.
    QueueHit {
        target: CombatantId,
        amount: u32,
        context: Option<ContextId>,
        kind: HitKind,
        source: Option<CombatantId>,
    },

    /// Direct hit-point modification (card effects, burn, healing).
    /// Outgoing passive bonuses apply before clamping.
    ModifyHp {
        target: CombatantId,
        delta: i32,
        kind: HitKind,
        source: Option<CombatantId>,
    },

    /// Delta mutation of a passive stack.
    AdjustPassive {
        owner: PassiveOwner,
        kind: PassiveKind,
        delta: i32,
    },

    /// Set (or, with zero, remove) a passive stack outright.
    SetPassive {
        owner: PassiveOwner,
        kind: PassiveKind,
        stacks: u32,
    },
}

/// Outbound notifications for presentation and other collaborators.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Notification {
    /// The phase machine moved. The only public side effect it has.
    PhaseChanged {
        previous: SubPhase,
        current: SubPhase,
        turn: TurnNumber,
    },

    /// The planner queued an attack; `name` is the display text.
    IntentTelegraphed {
        enemy: CombatantId,
        attack: AttackId,
        context: ContextId,
        step: u8,
        name: String,
        is_ambush: bool,
    },

    /// An attack finished resolving.
    AttackResolved {
        context: ContextId,
        was_blocked: bool,
    },

    /// A stunned attack was discarded without resolving.
    AttackSkipped { context: ContextId },

    /// A passive fired (presentation pulse).
    PassiveTriggered {
        owner: PassiveOwner,
        kind: PassiveKind,
    },

    /// An unblocked attack forces the player to discard.
    ForcedDiscard { count: u32 },

    /// Hit points changed after mitigation.
    DamageApplied {
        target: CombatantId,
        amount: u32,
        hp_before: u32,
        hp_after: u32,
    },

    /// The player crossed the death edge. Ends the battle.
    PlayerDied,

    /// An enemy crossed the death edge.
    EnemyDefeated { enemy: CombatantId },

    /// Every enemy is down; the post-battle sequence may begin.
    Victory,
}
