//! Card definition loader.

use std::collections::HashMap;

use anyhow::Context;
use battle_core::{CardDefinition, CardId, CardOracle};

use crate::loaders::LoadResult;

/// Registry for card definitions.
#[derive(Debug, Clone)]
pub struct CardRegistry {
    cards: HashMap<CardId, CardDefinition>,
}

impl CardRegistry {
    /// Loads the embedded card catalog.
    pub fn load() -> LoadResult<Self> {
        Self::load_from_str(include_str!("../../data/cards.ron"))
            .context("failed to parse cards.ron")
    }

    /// Loads a card catalog from RON text.
    pub fn load_from_str(source: &str) -> LoadResult<Self> {
        let definitions: Vec<CardDefinition> = ron::from_str(source)?;
        let mut cards = HashMap::new();
        for definition in definitions {
            cards.insert(definition.id.clone(), definition);
        }
        Ok(Self { cards })
    }

    pub fn get(&self, id: &CardId) -> Option<&CardDefinition> {
        self.cards.get(id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl CardOracle for CardRegistry {
    fn card(&self, id: &CardId) -> Option<&CardDefinition> {
        self.cards.get(id)
    }
}
