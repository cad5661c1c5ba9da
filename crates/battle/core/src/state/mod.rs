//! Canonical battle state.
//!
//! All mutation flows through [`crate::director::BattleDirector`]; everything
//! here is plain data with single-writer discipline per component.

mod combatant;
mod common;
mod intent;
mod passives;
mod phase;
mod progress;

pub use combatant::{CombatantState, EnemyState};
pub use common::{
    AttackId, CardColor, CardId, CardInstanceId, CombatantId, ContextId, EnemyId, HitKind,
    ResourceMeter, TurnNumber,
};
pub use intent::{IntentQueue, IntentQueues, PlannedAttack};
pub use passives::{PassiveKind, PassiveLedger, PassiveOwner};
pub use phase::{MainPhase, PhaseState, SubPhase};
pub use progress::{AttackProgress, ProgressLedger};

use crate::combat::PendingHit;

/// Aggregate state for one battle.
#[derive(Clone, Debug)]
pub struct BattleState {
    /// Phase state machine data (written only by the phase machine).
    pub phase: PhaseState,

    pub player: CombatantState,
    pub enemies: Vec<EnemyState>,

    /// Stacking passives over combatants and cards.
    pub passives: PassiveLedger,

    /// Per-context attack progress counters.
    pub progress: ProgressLedger,

    /// Damage accumulated while waiting for an impact signal.
    pub pending: Vec<PendingHit>,
}

impl BattleState {
    /// Fresh state with the given player vitals and no enemies yet.
    pub fn new(player_name: impl Into<String>, player_max_hp: u32) -> Self {
        Self {
            phase: PhaseState::new(),
            player: CombatantState::new(CombatantId::PLAYER, player_name, player_max_hp),
            enemies: Vec::new(),
            passives: PassiveLedger::new(),
            progress: ProgressLedger::new(),
            pending: Vec::new(),
        }
    }

    pub fn enemy(&self, id: CombatantId) -> Option<&EnemyState> {
        self.enemies.iter().find(|e| e.id() == id)
    }

    pub fn enemy_mut(&mut self, id: CombatantId) -> Option<&mut EnemyState> {
        self.enemies.iter_mut().find(|e| e.id() == id)
    }

    /// Vitals for any combatant (player or enemy).
    pub fn combatant(&self, id: CombatantId) -> Option<&CombatantState> {
        if id.is_player() {
            Some(&self.player)
        } else {
            self.enemy(id).map(|e| &e.combatant)
        }
    }

    pub fn combatant_mut(&mut self, id: CombatantId) -> Option<&mut CombatantState> {
        if id.is_player() {
            Some(&mut self.player)
        } else {
            self.enemy_mut(id).map(|e| &mut e.combatant)
        }
    }

    /// True once every enemy is dead.
    pub fn all_enemies_defeated(&self) -> bool {
        self.enemies.iter().all(|e| !e.is_alive())
    }
}
