//! Enemy definition loader.

use std::collections::HashMap;

use anyhow::Context;
use battle_core::{EnemyDefinition, EnemyId, EnemyOracle};

use crate::loaders::LoadResult;

/// Registry for enemy definitions.
#[derive(Debug, Clone)]
pub struct EnemyRegistry {
    enemies: HashMap<EnemyId, EnemyDefinition>,
}

impl EnemyRegistry {
    /// Loads the embedded bestiary.
    pub fn load() -> LoadResult<Self> {
        Self::load_from_str(include_str!("../../data/enemies.ron"))
            .context("failed to parse enemies.ron")
    }

    /// Loads a bestiary from RON text.
    pub fn load_from_str(source: &str) -> LoadResult<Self> {
        let definitions: Vec<EnemyDefinition> = ron::from_str(source)?;
        let mut enemies = HashMap::new();
        for definition in definitions {
            enemies.insert(definition.id.clone(), definition);
        }
        Ok(Self { enemies })
    }

    pub fn get(&self, id: &EnemyId) -> Option<&EnemyDefinition> {
        self.enemies.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &EnemyId> {
        self.enemies.keys()
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }
}

impl EnemyOracle for EnemyRegistry {
    fn enemy(&self, id: &EnemyId) -> Option<&EnemyDefinition> {
        self.enemies.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::AttackRegistry;

    #[test]
    fn embedded_bestiary_loads() {
        let registry = EnemyRegistry::load().expect("failed to load bestiary");
        assert!(registry.len() >= 3);

        let ghoul = registry.get(&EnemyId::new("ghoul")).unwrap();
        assert!(ghoul.max_hp > 0);
        assert!(!ghoul.roster.is_empty());
    }

    #[test]
    fn every_roster_entry_has_an_attack_definition() {
        let enemies = EnemyRegistry::load().unwrap();
        let attacks = AttackRegistry::load().unwrap();

        for id in enemies.ids() {
            let enemy = enemies.get(id).unwrap();
            for attack_id in &enemy.roster {
                assert!(
                    attacks.get(attack_id).is_some(),
                    "enemy {id} references missing attack {attack_id}"
                );
            }
        }
    }
}
