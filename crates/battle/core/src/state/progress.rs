//! Per-attack-instance progress counters.
//!
//! One record per [`ContextId`], created lazily when cards are played or
//! block is assigned during that attack's resolution window, and dropped
//! once the owning planned attack resolves. This is the *only* state the
//! condition evaluator may read.

use std::collections::HashMap;

use super::common::{CardColor, ContextId};

/// Counters accumulated while a planned attack is the active resolution
/// target. All fields are non-negative by construction.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackProgress {
    /// Total cards played into this context.
    pub played_cards: u32,

    /// Cards played, bucketed by color.
    pub played_by_color: [u32; CardColor::COUNT],

    /// Block assigned against this attack.
    pub assigned_block: u32,

    /// Damage absorbed by Aegis stacks during mitigation.
    pub aegis_absorbed: u32,

    /// The attack's base damage, captured from its planned attack.
    pub base_damage: u32,
}

impl AttackProgress {
    pub fn new(base_damage: u32) -> Self {
        Self {
            played_cards: 0,
            played_by_color: [0; CardColor::COUNT],
            assigned_block: 0,
            aegis_absorbed: 0,
            base_damage,
        }
    }
}

/// Ledger of progress records keyed by context id.
#[derive(Clone, Debug, Default)]
pub struct ProgressLedger {
    records: HashMap<ContextId, AttackProgress>,
}

impl ProgressLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, context: ContextId) -> Option<&AttackProgress> {
        self.records.get(&context)
    }

    /// Mutable lookup that never creates a record; mitigation has nothing
    /// to consume from a context with no prior block or card activity.
    pub fn get_mut(&mut self, context: ContextId) -> Option<&mut AttackProgress> {
        self.records.get_mut(&context)
    }

    /// Fetches the record for `context`, creating it lazily with the given
    /// base damage.
    pub fn entry(&mut self, context: ContextId, base_damage: u32) -> &mut AttackProgress {
        self.records
            .entry(context)
            .or_insert_with(|| AttackProgress::new(base_damage))
    }

    /// Records a played card.
    pub fn note_card(&mut self, context: ContextId, color: CardColor, base_damage: u32) {
        let record = self.entry(context, base_damage);
        record.played_cards += 1;
        record.played_by_color[color.index()] += 1;
    }

    /// Records assigned block.
    pub fn note_block(&mut self, context: ContextId, amount: u32, base_damage: u32) {
        self.entry(context, base_damage).assigned_block += amount;
    }

    /// Drops the record once its planned attack has resolved.
    pub fn discard(&mut self, context: ContextId) {
        self.records.remove(&context);
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Clears every record (battle reset).
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_are_created_lazily() {
        let mut ledger = ProgressLedger::new();
        let ctx = ContextId(7);
        assert!(ledger.get(ctx).is_none());

        ledger.note_card(ctx, CardColor::Green, 6);
        let record = ledger.get(ctx).unwrap();
        assert_eq!(record.played_cards, 1);
        assert_eq!(record.played_by_color[CardColor::Green.index()], 1);
        assert_eq!(record.base_damage, 6);
    }

    #[test]
    fn block_accumulates_per_context() {
        let mut ledger = ProgressLedger::new();
        ledger.note_block(ContextId(1), 3, 10);
        ledger.note_block(ContextId(1), 4, 10);
        ledger.note_block(ContextId(2), 1, 10);

        assert_eq!(ledger.get(ContextId(1)).unwrap().assigned_block, 7);
        assert_eq!(ledger.get(ContextId(2)).unwrap().assigned_block, 1);
    }

    #[test]
    fn discard_removes_the_record() {
        let mut ledger = ProgressLedger::new();
        ledger.note_block(ContextId(1), 3, 10);
        ledger.discard(ContextId(1));
        assert!(ledger.get(ContextId(1)).is_none());
    }
}
