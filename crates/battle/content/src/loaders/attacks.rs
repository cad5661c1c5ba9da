//! Attack definition loader.
//!
//! Loads attack definitions from RON data files.

use std::collections::HashMap;

use anyhow::Context;
use battle_core::{AttackDefinition, AttackId, AttackOracle};

use crate::loaders::LoadResult;

/// Registry for attack definitions.
///
/// Loads [`AttackDefinition`] data from RON and provides lookup by id.
#[derive(Debug, Clone)]
pub struct AttackRegistry {
    attacks: HashMap<AttackId, AttackDefinition>,
}

impl AttackRegistry {
    /// Loads the embedded attack catalog.
    pub fn load() -> LoadResult<Self> {
        Self::load_from_str(include_str!("../../data/attacks.ron"))
            .context("failed to parse attacks.ron")
    }

    /// Loads an attack catalog from RON text.
    pub fn load_from_str(source: &str) -> LoadResult<Self> {
        let definitions: Vec<AttackDefinition> = ron::from_str(source)?;
        let mut attacks = HashMap::new();
        for definition in definitions {
            attacks.insert(definition.id.clone(), definition);
        }
        Ok(Self { attacks })
    }

    pub fn get(&self, id: &AttackId) -> Option<&AttackDefinition> {
        self.attacks.get(id)
    }

    /// Returns an iterator over all registered attack ids.
    pub fn ids(&self) -> impl Iterator<Item = &AttackId> {
        self.attacks.keys()
    }

    pub fn len(&self) -> usize {
        self.attacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attacks.is_empty()
    }
}

impl AttackOracle for AttackRegistry {
    fn attack(&self, id: &AttackId) -> Option<&AttackDefinition> {
        self.attacks.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::Condition;

    #[test]
    fn embedded_catalog_loads() {
        let registry = AttackRegistry::load().expect("failed to load attack catalog");
        assert!(registry.len() >= 6, "should ship a usable attack catalog");

        let claw = registry
            .get(&AttackId::new("claw_swipe"))
            .expect("claw_swipe should exist");
        assert_eq!(claw.name, "Claw Swipe");
        assert!(claw.base_damage > 0);
        assert!(!claw.on_hit.is_empty());
    }

    #[test]
    fn condition_trees_round_trip_from_ron() {
        let registry = AttackRegistry::load_from_str(
            r#"[
                (
                    id: "test_strike",
                    name: "Test Strike",
                    base_damage: 3,
                    blocked_when: Any([
                        BlockAtLeast(amount: 3),
                        PlayedColorAtLeast(color: Red, count: 2),
                    ]),
                    on_hit: [Strike()],
                ),
            ]"#,
        )
        .unwrap();

        let attack = registry.get(&AttackId::new("test_strike")).unwrap();
        match &attack.blocked_when {
            Condition::Any(children) => assert_eq!(children.len(), 2),
            other => panic!("unexpected condition: {other:?}"),
        }
        assert!(attack.on_unblocked.is_empty());
        assert!(attack.ambush_chance.is_none());
    }
}
