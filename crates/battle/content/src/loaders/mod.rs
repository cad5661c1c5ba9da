//! Content loaders for reading battle data from RON.
//!
//! Loaders convert RON files into oracle implementations. The shipped data
//! under `data/` is embedded with `include_str!`; `load_from_str` variants
//! exist for externally authored files and test fixtures.

mod attacks;
mod cards;
mod enemies;

pub use attacks::AttackRegistry;
pub use cards::CardRegistry;
pub use enemies::EnemyRegistry;

use battle_core::{ContentEnv, RngOracle};

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Every registry a battle needs, loaded together.
pub struct ContentLibrary {
    pub attacks: AttackRegistry,
    pub enemies: EnemyRegistry,
    pub cards: CardRegistry,
}

impl ContentLibrary {
    /// Loads the embedded content set.
    pub fn load() -> LoadResult<Self> {
        Ok(Self {
            attacks: AttackRegistry::load()?,
            enemies: EnemyRegistry::load()?,
            cards: CardRegistry::load()?,
        })
    }

    /// Bundles the registries into the core's oracle aggregate.
    pub fn env<'a>(&'a self, rng: &'a dyn RngOracle) -> ContentEnv<'a> {
        ContentEnv::new(&self.attacks, &self.enemies, &self.cards, rng)
    }
}
