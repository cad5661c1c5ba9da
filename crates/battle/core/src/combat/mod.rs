//! Resolution and damage pipeline building blocks.
//!
//! The orchestration (who resolves what, when) lives in
//! [`crate::director::BattleDirector`]; this module holds the data types and
//! the pure mitigation math.

mod damage;
mod effect;

pub use damage::{MitigationOutcome, PendingHit, mitigate};
pub use effect::{AttackEffect, EffectTarget};
