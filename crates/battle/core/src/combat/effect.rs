//! Content-driven attack effects.
//!
//! Effects are the atomic consequences an attack definition lists under
//! `on_hit` and `on_unblocked`. The director applies them; the variants here
//! stay plain data so content can be authored and inspected freely.

use crate::state::{PassiveKind, PassiveOwner};

/// Who an effect applies to, relative to the attacking enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectTarget {
    /// The defending player.
    Player,
    /// The enemy performing the attack.
    Attacker,
}

/// One effect applied during attack resolution.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackEffect {
    /// Deal damage, pending until the impact signal. `amount: None` uses
    /// the planned attack's base damage.
    Strike {
        #[cfg_attr(feature = "serde", serde(default))]
        amount: Option<u32>,
    },

    /// Apply stacks of a passive.
    ApplyPassive {
        kind: PassiveKind,
        stacks: u32,
        target: EffectTarget,
    },

    /// Add to a combatant's persistent stored-block pool.
    GainStoredBlock { amount: u32, target: EffectTarget },

    /// Force the player to discard; hand state belongs to presentation, so
    /// this only emits a notification.
    ForceDiscard { count: u32 },

    /// Restore hit points, clamped at the maximum.
    Heal { amount: u32, target: EffectTarget },
}

impl AttackEffect {
    /// Resolves the effect's target to a passive-ledger owner given the
    /// attacking enemy.
    pub fn owner_for(
        target: EffectTarget,
        attacker: crate::state::CombatantId,
    ) -> PassiveOwner {
        match target {
            EffectTarget::Player => PassiveOwner::Combatant(crate::state::CombatantId::PLAYER),
            EffectTarget::Attacker => PassiveOwner::Combatant(attacker),
        }
    }
}
