//! Tokio host for the battle core.
//!
//! The core is synchronous and tick-driven; this crate gives it an
//! imperative shell: one worker task owns the [`battle_core::BattleDirector`]
//! (no other code ever touches it), a command handle serializes inbound
//! requests, and a topic-based broadcast bus fans notifications out to
//! presentation.

pub mod config;
pub mod error;
pub mod events;
pub mod handle;
pub mod runtime;
pub mod worker;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use events::{CombatEvent, Event, EventBus, IntentEvent, LifecycleEvent, PhaseEvent, Topic};
pub use handle::{BattleHandle, BattleSetup};
pub use runtime::Runtime;
pub use worker::{BattleSnapshot, BattleWorker, Command};
