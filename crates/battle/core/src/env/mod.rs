//! Traits describing read-only content data.
//!
//! Oracles expose attack, enemy, and card definitions authored outside this
//! core. The [`ContentEnv`] aggregate bundles them so the director can reach
//! everything it needs without hard coupling to concrete registries; tests
//! substitute fixtures freely.

mod attacks;
mod cards;
mod enemies;
mod error;
mod rng;

pub use attacks::{AttackDefinition, AttackOracle};
pub use cards::{CardDefinition, CardOracle};
pub use enemies::{EnemyDefinition, EnemyOracle};
pub use error::OracleError;
pub use rng::{PcgRng, RngOracle, compute_seed};

use crate::state::{AttackId, CardId, EnemyId};

/// Aggregates the read-only oracles required by planning and resolution.
#[derive(Clone, Copy)]
pub struct ContentEnv<'a> {
    attacks: &'a dyn AttackOracle,
    enemies: &'a dyn EnemyOracle,
    cards: &'a dyn CardOracle,
    rng: &'a dyn RngOracle,
}

impl<'a> ContentEnv<'a> {
    pub fn new(
        attacks: &'a dyn AttackOracle,
        enemies: &'a dyn EnemyOracle,
        cards: &'a dyn CardOracle,
        rng: &'a dyn RngOracle,
    ) -> Self {
        Self {
            attacks,
            enemies,
            cards,
            rng,
        }
    }

    /// Attack definition lookup. `None` is an expected, skip-and-log case.
    pub fn attack(&self, id: &AttackId) -> Option<&'a AttackDefinition> {
        self.attacks.attack(id)
    }

    /// Card definition lookup. `None` is an expected, skip-and-log case.
    pub fn card(&self, id: &CardId) -> Option<&'a CardDefinition> {
        self.cards.card(id)
    }

    /// Enemy definition lookup; battles cannot start without one.
    pub fn enemy(&self, id: &EnemyId) -> Result<&'a EnemyDefinition, OracleError> {
        self.enemies
            .enemy(id)
            .ok_or_else(|| OracleError::EnemyNotFound(id.clone()))
    }

    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }
}
