//! Deterministic combat-resolution core for a turn-based card battler.
//!
//! `battle-core` decides *what happens and in what order* during a fight,
//! independent of rendering and input. All state mutation flows through
//! [`director::BattleDirector`], which serializes gameplay effects with
//! externally signaled presentation events via the deferred queue, and
//! supporting crates depend on the types re-exported here.

pub mod combat;
pub mod condition;
pub mod config;
pub mod director;
pub mod env;
pub mod events;
pub mod machine;
pub mod planner;
pub mod schedule;
pub mod state;

pub use combat::{AttackEffect, EffectTarget, MitigationOutcome, PendingHit};
pub use condition::Condition;
pub use config::BattleConfig;
pub use director::{BattleDirector, BattleOutcome, DirectorError};
pub use env::{
    AttackDefinition, AttackOracle, CardDefinition, CardOracle, ContentEnv, EnemyDefinition,
    EnemyOracle, OracleError, PcgRng, RngOracle, compute_seed,
};
pub use events::{BattleCommand, Notification};
pub use machine::{PhaseChange, PhaseMachine};
pub use planner::{Archetype, IntentPlanner};
pub use schedule::{DeferredQueue, QueuedAction, Signal, SignalFilter, SignalKind, Trigger};
pub use state::{
    AttackId, AttackProgress, BattleState, CardColor, CardId, CardInstanceId, CombatantId,
    CombatantState, ContextId, EnemyId, EnemyState, HitKind, IntentQueue, IntentQueues, MainPhase,
    PassiveKind, PassiveLedger, PassiveOwner, PhaseState, PlannedAttack, ProgressLedger,
    ResourceMeter, SubPhase, TurnNumber,
};
