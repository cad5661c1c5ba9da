//! Typed events fanned out over the bus, grouped by topic.
//!
//! Each variant mirrors one core [`Notification`]; the split into per-topic
//! enums lets consumers subscribe to exactly the slice they render.

use serde::{Deserialize, Serialize};

use battle_core::{
    AttackId, CombatantId, ContextId, Notification, PassiveKind, PassiveOwner, SubPhase,
    TurnNumber,
};

/// Phase machine output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PhaseEvent {
    Changed {
        previous: SubPhase,
        current: SubPhase,
        turn: TurnNumber,
    },
}

/// Intent planner output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum IntentEvent {
    Telegraphed {
        enemy: CombatantId,
        attack: AttackId,
        context: ContextId,
        step: u8,
        name: String,
        is_ambush: bool,
    },
    Skipped {
        context: ContextId,
    },
}

/// Resolution and damage pipeline output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CombatEvent {
    Resolved {
        context: ContextId,
        was_blocked: bool,
    },
    PassiveTriggered {
        owner: PassiveOwner,
        kind: PassiveKind,
    },
    ForcedDiscard {
        count: u32,
    },
    Damage {
        target: CombatantId,
        amount: u32,
        hp_before: u32,
        hp_after: u32,
    },
}

/// Battle lifecycle edges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LifecycleEvent {
    PlayerDied,
    EnemyDefeated { enemy: CombatantId },
    Victory,
}

/// Converts a core notification into its bus event.
pub fn event_for(notification: Notification) -> super::Event {
    use super::Event;
    match notification {
        Notification::PhaseChanged {
            previous,
            current,
            turn,
        } => Event::Phase(PhaseEvent::Changed {
            previous,
            current,
            turn,
        }),
        Notification::IntentTelegraphed {
            enemy,
            attack,
            context,
            step,
            name,
            is_ambush,
        } => Event::Intent(IntentEvent::Telegraphed {
            enemy,
            attack,
            context,
            step,
            name,
            is_ambush,
        }),
        Notification::AttackSkipped { context } => Event::Intent(IntentEvent::Skipped { context }),
        Notification::AttackResolved {
            context,
            was_blocked,
        } => Event::Combat(CombatEvent::Resolved {
            context,
            was_blocked,
        }),
        Notification::PassiveTriggered { owner, kind } => {
            Event::Combat(CombatEvent::PassiveTriggered { owner, kind })
        }
        Notification::ForcedDiscard { count } => {
            Event::Combat(CombatEvent::ForcedDiscard { count })
        }
        Notification::DamageApplied {
            target,
            amount,
            hp_before,
            hp_after,
        } => Event::Combat(CombatEvent::Damage {
            target,
            amount,
            hp_before,
            hp_after,
        }),
        Notification::PlayerDied => Event::Lifecycle(LifecycleEvent::PlayerDied),
        Notification::EnemyDefeated { enemy } => {
            Event::Lifecycle(LifecycleEvent::EnemyDefeated { enemy })
        }
        Notification::Victory => Event::Lifecycle(LifecycleEvent::Victory),
    }
}
