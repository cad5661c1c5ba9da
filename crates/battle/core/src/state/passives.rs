//! Stacking status effects ("passives") applied to combatants and cards.
//!
//! The ledger is a multiset over `(owner, kind)`. A key is present iff its
//! stack count is positive; any mutation that would drive a count to zero or
//! below removes the key instead.

use std::collections::HashMap;

use super::common::{CardInstanceId, CombatantId};

/// Types of stacking passive effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PassiveKind {
    /// Damages its own owner by the stack count at the owner's turn start.
    /// The only passive that is never consumed by its trigger.
    Burn,

    /// Consumed one stack per leading unresolved enemy attack at PreBlock,
    /// marking that attack skipped.
    Stun,

    /// Flat damage prevention inside the mitigation pipeline, decremented
    /// by the amount absorbed.
    Aegis,

    /// Turn-scoped action penalty.
    Slow,

    /// Outgoing attack-damage bonus, fully consumed by the first hit it
    /// contributes to.
    DowseWithHolyWater,

    // Card-scoped debuffs, keyed by card instance rather than combatant.
    Frozen,
    Intimidated,
    Shackle,
}

impl PassiveKind {
    /// True for passives that tick down during the PlayerEnd cleanup hook.
    pub const fn is_turn_scoped(self) -> bool {
        matches!(
            self,
            PassiveKind::Slow
                | PassiveKind::Frozen
                | PassiveKind::Intimidated
                | PassiveKind::Shackle
        )
    }
}

/// What a passive ledger entry is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PassiveOwner {
    Combatant(CombatantId),
    Card(CardInstanceId),
}

impl From<CombatantId> for PassiveOwner {
    fn from(id: CombatantId) -> Self {
        PassiveOwner::Combatant(id)
    }
}

impl From<CardInstanceId> for PassiveOwner {
    fn from(id: CardInstanceId) -> Self {
        PassiveOwner::Card(id)
    }
}

/// Ledger of stacking passives.
///
/// Invariant: every stored stack count is > 0.
#[derive(Clone, Debug, Default)]
pub struct PassiveLedger {
    stacks: HashMap<(PassiveOwner, PassiveKind), u32>,
}

impl PassiveLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current stack count, zero when the key is absent.
    pub fn stacks(&self, owner: impl Into<PassiveOwner>, kind: PassiveKind) -> u32 {
        self.stacks
            .get(&(owner.into(), kind))
            .copied()
            .unwrap_or(0)
    }

    pub fn has(&self, owner: impl Into<PassiveOwner>, kind: PassiveKind) -> bool {
        self.stacks(owner, kind) > 0
    }

    /// Applies a signed delta. Returns the resulting stack count; a result
    /// of zero means the key was removed.
    pub fn adjust(
        &mut self,
        owner: impl Into<PassiveOwner>,
        kind: PassiveKind,
        delta: i32,
    ) -> u32 {
        let key = (owner.into(), kind);
        let current = self.stacks.get(&key).copied().unwrap_or(0) as i64;
        let next = current + delta as i64;
        if next > 0 {
            let next = next.min(u32::MAX as i64) as u32;
            self.stacks.insert(key, next);
            next
        } else {
            self.stacks.remove(&key);
            0
        }
    }

    /// Sets a stack count outright; zero removes the key.
    pub fn set(&mut self, owner: impl Into<PassiveOwner>, kind: PassiveKind, count: u32) {
        let key = (owner.into(), kind);
        if count > 0 {
            self.stacks.insert(key, count);
        } else {
            self.stacks.remove(&key);
        }
    }

    /// Removes the key entirely, returning the stacks it held.
    ///
    /// Used for fully-consumed passives such as DowseWithHolyWater.
    pub fn drain(&mut self, owner: impl Into<PassiveOwner>, kind: PassiveKind) -> u32 {
        self.stacks.remove(&(owner.into(), kind)).unwrap_or(0)
    }

    /// Consumes up to `amount` stacks, returning how many were consumed.
    ///
    /// The Aegis mitigation layer uses this: the count never goes below
    /// zero, and the key disappears when fully spent.
    pub fn absorb(
        &mut self,
        owner: impl Into<PassiveOwner>,
        kind: PassiveKind,
        amount: u32,
    ) -> u32 {
        let key = (owner.into(), kind);
        let Some(current) = self.stacks.get(&key).copied() else {
            return 0;
        };
        let consumed = amount.min(current);
        if consumed == current {
            self.stacks.remove(&key);
        } else {
            self.stacks.insert(key, current - consumed);
        }
        consumed
    }

    /// Decrements every turn-scoped passive by one (PlayerEnd cleanup).
    pub fn end_of_turn_cleanup(&mut self) {
        let expiring: Vec<(PassiveOwner, PassiveKind)> = self
            .stacks
            .keys()
            .filter(|(_, kind)| kind.is_turn_scoped())
            .copied()
            .collect();
        for (owner, kind) in expiring {
            self.adjust(owner, kind, -1);
        }
    }

    /// Iterates over `(owner, kind, stacks)` entries.
    pub fn iter(&self) -> impl Iterator<Item = (PassiveOwner, PassiveKind, u32)> + '_ {
        self.stacks
            .iter()
            .map(|(&(owner, kind), &count)| (owner, kind, count))
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    /// Clears every entry (battle reset).
    pub fn clear(&mut self) {
        self.stacks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: CombatantId = CombatantId(1);

    #[test]
    fn stacks_never_go_negative() {
        let mut ledger = PassiveLedger::new();
        ledger.adjust(OWNER, PassiveKind::Burn, 3);
        assert_eq!(ledger.stacks(OWNER, PassiveKind::Burn), 3);

        ledger.adjust(OWNER, PassiveKind::Burn, -5);
        assert_eq!(ledger.stacks(OWNER, PassiveKind::Burn), 0);
        assert!(ledger.is_empty());
    }

    #[test]
    fn key_absent_whenever_value_would_be_zero() {
        let mut ledger = PassiveLedger::new();
        ledger.adjust(OWNER, PassiveKind::Aegis, 2);
        ledger.adjust(OWNER, PassiveKind::Aegis, -2);
        assert!(!ledger.has(OWNER, PassiveKind::Aegis));

        ledger.set(OWNER, PassiveKind::Aegis, 4);
        ledger.set(OWNER, PassiveKind::Aegis, 0);
        assert!(!ledger.has(OWNER, PassiveKind::Aegis));
    }

    #[test]
    fn absorb_consumes_at_most_available() {
        let mut ledger = PassiveLedger::new();
        ledger.set(OWNER, PassiveKind::Aegis, 3);

        assert_eq!(ledger.absorb(OWNER, PassiveKind::Aegis, 2), 2);
        assert_eq!(ledger.stacks(OWNER, PassiveKind::Aegis), 1);
        assert_eq!(ledger.absorb(OWNER, PassiveKind::Aegis, 9999), 1);
        assert!(!ledger.has(OWNER, PassiveKind::Aegis));
    }

    #[test]
    fn drain_takes_everything_at_once() {
        let mut ledger = PassiveLedger::new();
        ledger.set(OWNER, PassiveKind::DowseWithHolyWater, 5);
        assert_eq!(ledger.drain(OWNER, PassiveKind::DowseWithHolyWater), 5);
        assert_eq!(ledger.drain(OWNER, PassiveKind::DowseWithHolyWater), 0);
    }

    #[test]
    fn cleanup_only_touches_turn_scoped_passives() {
        let mut ledger = PassiveLedger::new();
        let card = CardInstanceId(9);
        ledger.set(OWNER, PassiveKind::Burn, 2);
        ledger.set(OWNER, PassiveKind::Slow, 1);
        ledger.set(card, PassiveKind::Frozen, 2);

        ledger.end_of_turn_cleanup();

        assert_eq!(ledger.stacks(OWNER, PassiveKind::Burn), 2);
        assert!(!ledger.has(OWNER, PassiveKind::Slow));
        assert_eq!(ledger.stacks(card, PassiveKind::Frozen), 1);
    }
}
