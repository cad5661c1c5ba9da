//! Card definition records and their oracle.
//!
//! Card *content* (what a card does when played) is a collaborator's
//! concern; the core only needs enough of a record to resolve display names
//! and block values for ids arriving over the bus.

use crate::state::{CardColor, CardId};

/// Immutable content record describing one card.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardDefinition {
    pub id: CardId,
    pub name: String,
    pub color: CardColor,

    /// Block assigned when this card is committed to blocking.
    #[cfg_attr(feature = "serde", serde(default))]
    pub block: u32,
}

/// Read-only lookup of card definitions by id.
pub trait CardOracle: Send + Sync {
    fn card(&self, id: &CardId) -> Option<&CardDefinition>;
}
