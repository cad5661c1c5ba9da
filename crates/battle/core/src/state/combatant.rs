//! Combatant state: the player and the enemies of one battle.

use super::common::{CombatantId, EnemyId, ResourceMeter};
use super::intent::IntentQueues;
use crate::env::EnemyDefinition;
use crate::planner::Archetype;
use crate::state::AttackId;

/// Vital state shared by the player and enemies.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantState {
    pub id: CombatantId,
    pub name: String,
    pub hp: ResourceMeter,

    /// Persistent multi-turn mitigation pool, distinct from the per-attack
    /// assigned block.
    pub stored_block: u32,
}

impl CombatantState {
    pub fn new(id: CombatantId, name: impl Into<String>, max_hp: u32) -> Self {
        Self {
            id,
            name: name.into(),
            hp: ResourceMeter::full(max_hp),
            stored_block: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.hp.is_depleted()
    }
}

/// One enemy: vitals plus its attack roster and intent queues.
///
/// Definition-derived fields are denormalized at battle start so the intent
/// planner only consults content for per-attack data.
#[derive(Clone, Debug)]
pub struct EnemyState {
    pub combatant: CombatantState,

    /// Content definition this enemy was instantiated from.
    pub definition: EnemyId,

    /// Turn-selection strategy.
    pub archetype: Archetype,

    /// Attacks this enemy can plan, in definition order.
    pub roster: Vec<AttackId>,

    /// Archetype-level ambush chance (percent), overridable per attack.
    pub ambush_chance: u32,

    /// Current and next-turn planned attacks.
    pub intents: IntentQueues,
}

impl EnemyState {
    /// Instantiates an enemy from its content definition.
    pub fn from_definition(id: CombatantId, definition: &EnemyDefinition) -> Self {
        Self {
            combatant: CombatantState::new(id, definition.name.clone(), definition.max_hp),
            definition: definition.id.clone(),
            archetype: definition.archetype,
            roster: definition.roster.clone(),
            ambush_chance: definition.ambush_chance,
            intents: IntentQueues::new(),
        }
    }

    pub fn id(&self) -> CombatantId {
        self.combatant.id
    }

    pub fn is_alive(&self) -> bool {
        self.combatant.is_alive()
    }
}
