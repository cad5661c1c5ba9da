//! Recursive boolean conditions deciding whether a planned attack counts as
//! blocked.
//!
//! Evaluation is a pure function over an [`AttackProgress`] record: it never
//! mutates state and may be repeated any number of times with identical
//! results for the same context. Unknown leaves evaluate false: a
//! mis-granted "blocked" status is a gameplay-correctness bug, a denied one
//! is merely unfortunate.

use crate::state::{AttackProgress, CardColor};

/// A node in a blocked-condition tree.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Condition {
    /// True iff every child is true. Vacuously true.
    All(Vec<Condition>),

    /// True iff any child is true. Vacuously false.
    Any(Vec<Condition>),

    /// True iff the child is false.
    Not(Box<Condition>),

    /// At least `count` cards of `color` were played into the context.
    PlayedColorAtLeast { color: CardColor, count: u32 },

    /// At least `count` cards of any color were played into the context.
    PlayedAtLeast { count: u32 },

    /// At least `amount` block was assigned against the attack.
    BlockAtLeast { amount: u32 },

    /// Mitigation fully covers the hit: assigned block plus Aegis
    /// absorption reaches the attack's base damage.
    FullyMitigated,

    /// Landing site for content leaf kinds this build does not recognize.
    /// Always false.
    Unsupported,
}

/// Evaluates a condition tree against one attack's progress record.
pub fn evaluate(condition: &Condition, progress: &AttackProgress) -> bool {
    match condition {
        Condition::All(children) => children.iter().all(|c| evaluate(c, progress)),
        Condition::Any(children) => children.iter().any(|c| evaluate(c, progress)),
        Condition::Not(child) => !evaluate(child, progress),
        Condition::PlayedColorAtLeast { color, count } => {
            progress.played_by_color[color.index()] >= *count
        }
        Condition::PlayedAtLeast { count } => progress.played_cards >= *count,
        Condition::BlockAtLeast { amount } => progress.assigned_block >= *amount,
        Condition::FullyMitigated => {
            progress.assigned_block + progress.aegis_absorbed >= progress.base_damage
        }
        Condition::Unsupported => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(block: u32) -> AttackProgress {
        let mut p = AttackProgress::new(10);
        p.assigned_block = block;
        p
    }

    #[test]
    fn all_is_vacuously_true() {
        assert!(evaluate(&Condition::All(vec![]), &progress(0)));
    }

    #[test]
    fn any_is_vacuously_false() {
        assert!(!evaluate(&Condition::Any(vec![]), &progress(0)));
    }

    #[test]
    fn double_negation_is_identity() {
        let leaves = [
            Condition::BlockAtLeast { amount: 5 },
            Condition::PlayedAtLeast { count: 1 },
            Condition::PlayedColorAtLeast {
                color: CardColor::Red,
                count: 2,
            },
            Condition::FullyMitigated,
            Condition::Unsupported,
        ];
        for record in [progress(0), progress(5), progress(100)] {
            for leaf in &leaves {
                let double = Condition::Not(Box::new(Condition::Not(Box::new(leaf.clone()))));
                assert_eq!(
                    evaluate(leaf, &record),
                    evaluate(&double, &record),
                    "double negation diverged for {leaf:?}"
                );
            }
        }
    }

    #[test]
    fn block_threshold_is_exact_at_the_boundary() {
        let condition = Condition::BlockAtLeast { amount: 5 };
        assert!(!evaluate(&condition, &progress(4)));
        assert!(evaluate(&condition, &progress(5)));
        assert!(evaluate(&condition, &progress(6)));
    }

    #[test]
    fn color_counts_are_independent() {
        let mut record = AttackProgress::new(10);
        record.played_cards = 3;
        record.played_by_color[CardColor::Red.index()] = 2;
        record.played_by_color[CardColor::Blue.index()] = 1;

        assert!(evaluate(
            &Condition::PlayedColorAtLeast {
                color: CardColor::Red,
                count: 2
            },
            &record
        ));
        assert!(!evaluate(
            &Condition::PlayedColorAtLeast {
                color: CardColor::Green,
                count: 1
            },
            &record
        ));
        assert!(evaluate(&Condition::PlayedAtLeast { count: 3 }, &record));
    }

    #[test]
    fn fully_mitigated_counts_aegis_absorption() {
        let mut record = AttackProgress::new(10);
        record.assigned_block = 6;
        assert!(!evaluate(&Condition::FullyMitigated, &record));

        record.aegis_absorbed = 4;
        assert!(evaluate(&Condition::FullyMitigated, &record));
    }

    #[test]
    fn unsupported_leaves_fail_closed() {
        let record = progress(9999);
        assert!(!evaluate(&Condition::Unsupported, &record));
        // Fail-closed propagates through composition the obvious way.
        assert!(!evaluate(
            &Condition::All(vec![
                Condition::BlockAtLeast { amount: 1 },
                Condition::Unsupported
            ]),
            &record
        ));
        assert!(evaluate(
            &Condition::Any(vec![
                Condition::Unsupported,
                Condition::BlockAtLeast { amount: 1 }
            ]),
            &record
        ));
    }
}
