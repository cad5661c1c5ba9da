//! Enemy definition records and their oracle.

use crate::planner::Archetype;
use crate::state::{AttackId, EnemyId};

/// Immutable content record describing one enemy.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyDefinition {
    pub id: EnemyId,
    pub name: String,
    pub max_hp: u32,

    /// Turn-selection strategy.
    pub archetype: Archetype,

    /// Attacks this enemy may plan, in the order strategies index them.
    pub roster: Vec<AttackId>,

    /// Archetype-level ambush chance (percent); attacks may override.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ambush_chance: u32,
}

/// Read-only lookup of enemy definitions by id.
pub trait EnemyOracle: Send + Sync {
    fn enemy(&self, id: &EnemyId) -> Option<&EnemyDefinition>;
}
