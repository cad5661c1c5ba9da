//! Data-driven content definitions and loaders.
//!
//! This crate houses static battle content and provides loaders for RON data
//! files:
//! - Attack definitions (damage, blocked-conditions, effect lists)
//! - Enemy definitions (vitals, archetype, roster)
//! - Card definitions (color, block value)
//!
//! Content is consumed through the core's oracle traits and never appears in
//! battle state. All loaders deserialize battle-core types directly with
//! serde.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{AttackRegistry, CardRegistry, ContentLibrary, EnemyRegistry};
