//! Event bus and typed event payloads.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{CombatEvent, IntentEvent, LifecycleEvent, PhaseEvent, event_for};
