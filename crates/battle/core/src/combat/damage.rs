//! Layered damage mitigation.
//!
//! A released hit consumes, in order: the attack context's assigned block,
//! the target's Aegis stacks, the target's persistent stored-block pool,
//! and finally hit points (clamped at zero). Each layer fully consumes
//! before spilling to the next.

use crate::state::{
    AttackProgress, CombatantId, CombatantState, ContextId, HitKind, PassiveKind, PassiveLedger,
};

/// Damage waiting for its impact signal.
///
/// Keeping damage pending until the animation's impact frame keeps numbers
/// on screen in sync with what the simulation applies.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingHit {
    pub target: CombatantId,
    pub amount: u32,

    /// Attack context this hit belongs to, when it came from a planned
    /// attack; block assigned against that context mitigates it.
    pub context: Option<ContextId>,

    pub kind: HitKind,
    pub source: Option<CombatantId>,
}

/// Per-layer breakdown of one mitigated hit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MitigationOutcome {
    pub absorbed_by_assigned: u32,
    pub absorbed_by_aegis: u32,
    pub absorbed_by_stored: u32,
    pub hp_loss: u32,
    pub hp_before: u32,
    pub hp_after: u32,
}

impl MitigationOutcome {
    /// True when this hit moved hit points from positive to zero.
    ///
    /// The death edge is detected structurally (before/after comparison) so
    /// it can fire at most once per crossing.
    pub fn crossed_death_edge(&self) -> bool {
        self.hp_before > 0 && self.hp_after == 0
    }
}

/// Routes one released hit through the mitigation layers.
///
/// `progress` is the record for the hit's context, when it has one; the
/// assigned-block layer and the Aegis absorption counter live there.
pub fn mitigate(
    amount: u32,
    mut progress: Option<&mut AttackProgress>,
    passives: &mut PassiveLedger,
    target: &mut CombatantState,
) -> MitigationOutcome {
    let mut remaining = amount;

    // Layer 1: block assigned against this attack.
    let mut absorbed_by_assigned = 0;
    if let Some(record) = progress.as_deref_mut() {
        absorbed_by_assigned = remaining.min(record.assigned_block);
        record.assigned_block -= absorbed_by_assigned;
        remaining -= absorbed_by_assigned;
    }

    // Layer 2: Aegis stacks, decremented by the amount absorbed.
    let absorbed_by_aegis = passives.absorb(target.id, PassiveKind::Aegis, remaining);
    if let Some(record) = progress.as_deref_mut() {
        record.aegis_absorbed += absorbed_by_aegis;
    }
    remaining -= absorbed_by_aegis;

    // Layer 3: the persistent stored-block pool.
    let absorbed_by_stored = remaining.min(target.stored_block);
    target.stored_block -= absorbed_by_stored;
    remaining -= absorbed_by_stored;

    // Layer 4: hit points, clamped to [0, max].
    let hp_before = target.hp.current();
    let hp_loss = target.hp.lose(remaining);

    MitigationOutcome {
        absorbed_by_assigned,
        absorbed_by_aegis,
        absorbed_by_stored,
        hp_loss,
        hp_before,
        hp_after: target.hp.current(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AttackProgress;

    fn target(hp: u32, stored: u32) -> CombatantState {
        let mut c = CombatantState::new(CombatantId::PLAYER, "Hero", hp);
        c.stored_block = stored;
        c
    }

    /// HP loss = max(0, D - B - S) and stored' = max(0, S - max(0, D - B))
    /// over the full {0, 1, 5, 9999} cross-product.
    #[test]
    fn mitigation_ordering_holds_across_magnitudes() {
        const VALUES: [u32; 4] = [0, 1, 5, 9999];
        for damage in VALUES {
            for assigned in VALUES {
                for stored in VALUES {
                    let mut record = AttackProgress::new(damage);
                    record.assigned_block = assigned;
                    let mut passives = PassiveLedger::new();
                    let mut victim = target(100_000, stored);

                    let outcome =
                        mitigate(damage, Some(&mut record), &mut passives, &mut victim);

                    let spill = damage.saturating_sub(assigned);
                    assert_eq!(
                        outcome.hp_loss,
                        spill.saturating_sub(stored),
                        "D={damage} B={assigned} S={stored}"
                    );
                    assert_eq!(
                        victim.stored_block,
                        stored.saturating_sub(spill),
                        "D={damage} B={assigned} S={stored}"
                    );
                }
            }
        }
    }

    #[test]
    fn aegis_sits_between_assigned_and_stored_block() {
        let mut record = AttackProgress::new(10);
        record.assigned_block = 3;
        let mut passives = PassiveLedger::new();
        passives.set(CombatantId::PLAYER, PassiveKind::Aegis, 4);
        let mut victim = target(50, 2);

        let outcome = mitigate(10, Some(&mut record), &mut passives, &mut victim);

        assert_eq!(outcome.absorbed_by_assigned, 3);
        assert_eq!(outcome.absorbed_by_aegis, 4);
        assert_eq!(outcome.absorbed_by_stored, 2);
        assert_eq!(outcome.hp_loss, 1);
        assert_eq!(record.aegis_absorbed, 4);
        assert!(!passives.has(CombatantId::PLAYER, PassiveKind::Aegis));
    }

    #[test]
    fn aegis_is_never_driven_below_zero() {
        let mut passives = PassiveLedger::new();
        passives.set(CombatantId::PLAYER, PassiveKind::Aegis, 2);
        let mut victim = target(50, 0);

        let outcome = mitigate(1, None, &mut passives, &mut victim);
        assert_eq!(outcome.absorbed_by_aegis, 1);
        assert_eq!(passives.stacks(CombatantId::PLAYER, PassiveKind::Aegis), 1);
    }

    #[test]
    fn death_edge_is_a_strict_crossing() {
        let mut passives = PassiveLedger::new();
        let mut victim = target(10, 0);

        let first = mitigate(6, None, &mut passives, &mut victim);
        assert!(!first.crossed_death_edge());

        let second = mitigate(4, None, &mut passives, &mut victim);
        assert!(second.crossed_death_edge());

        // Already at zero: no second crossing.
        let third = mitigate(1, None, &mut passives, &mut victim);
        assert!(!third.crossed_death_edge());
    }
}
