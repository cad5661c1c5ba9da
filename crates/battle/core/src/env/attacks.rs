//! Attack definition records and their oracle.

use crate::combat::AttackEffect;
use crate::condition::Condition;
use crate::state::AttackId;

/// Immutable content record describing one enemy attack.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackDefinition {
    pub id: AttackId,

    /// Display name carried by telegraph notifications.
    pub name: String,

    /// Base damage, the amount a plain `Strike` deals.
    pub base_damage: u32,

    /// The attack counts as blocked iff this tree evaluates true against
    /// its progress record.
    pub blocked_when: Condition,

    /// Applied at resolution regardless of the blocked outcome.
    #[cfg_attr(feature = "serde", serde(default))]
    pub on_hit: Vec<AttackEffect>,

    /// Applied additionally when the attack was not blocked.
    #[cfg_attr(feature = "serde", serde(default))]
    pub on_unblocked: Vec<AttackEffect>,

    /// Percentage ambush chance overriding the enemy's archetype default.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ambush_chance: Option<u32>,
}

/// Read-only lookup of attack definitions by id.
pub trait AttackOracle: Send + Sync {
    fn attack(&self, id: &AttackId) -> Option<&AttackDefinition>;
}
