//! Battle orchestration.
//!
//! The [`BattleDirector`] owns the authoritative [`BattleState`], the
//! deferred queue, and the intent planner. Hosts drive it with `tick()` once
//! per logical frame and `observe()` for every external signal. Everything
//! else (phase hooks, resolution, mitigation, death edges) happens inside,
//! synchronously, in queue order.
//!
//! Single-writer discipline: phase state is written only through the phase
//! machine, intent queues only by the planner and resolution, the passive
//! ledger only by the hooks and commands described here.

use tracing::{debug, warn};

use crate::combat::{AttackEffect, EffectTarget, PendingHit, mitigate};
use crate::condition;
use crate::config::BattleConfig;
use crate::env::ContentEnv;
use crate::events::{BattleCommand, Notification};
use crate::machine::{PhaseChange, PhaseMachine};
use crate::planner::IntentPlanner;
use crate::schedule::{DeferredQueue, QueuedAction, Signal};
use crate::state::{
    AttackProgress, BattleState, CombatantId, ContextId, EnemyId, EnemyState, HitKind,
    PassiveKind, PassiveOwner, SubPhase,
};

/// Errors surfaced by director entry points.
#[derive(Debug, thiserror::Error)]
pub enum DirectorError {
    #[error(transparent)]
    Oracle(#[from] crate::env::OracleError),

    #[error("too many enemies for one battle (max {max})")]
    TooManyEnemies { max: usize },
}

/// How a battle concluded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleOutcome {
    /// The player crossed the death edge.
    Defeat,
    /// Every enemy is down.
    Victory,
}

/// Owns one battle and serializes all gameplay effects through the
/// deferred queue.
pub struct BattleDirector {
    config: BattleConfig,
    battle_seed: u64,
    state: BattleState,
    queue: DeferredQueue,
    planner: IntentPlanner,
    outcome: Option<BattleOutcome>,
    notifications: Vec<Notification>,
}

impl BattleDirector {
    pub fn new(config: BattleConfig) -> Self {
        Self {
            config,
            battle_seed: 0,
            state: BattleState::new("Player", 1),
            queue: DeferredQueue::new(),
            planner: IntentPlanner::new(),
            outcome: None,
            notifications: Vec::new(),
        }
    }

    /// Resets everything and schedules the opening transition.
    ///
    /// The battle sits in `StartBattle` for `start_delay_ticks`, then moves
    /// to `EnemyStart` through the queue like every other transition.
    pub fn begin_battle(
        &mut self,
        env: &ContentEnv<'_>,
        player_name: &str,
        player_max_hp: u32,
        enemy_ids: &[EnemyId],
        battle_seed: u64,
    ) -> Result<(), DirectorError> {
        if enemy_ids.len() > BattleConfig::MAX_ENEMIES {
            return Err(DirectorError::TooManyEnemies {
                max: BattleConfig::MAX_ENEMIES,
            });
        }

        self.state = BattleState::new(player_name, player_max_hp);
        self.queue.clear();
        self.planner.reset();
        self.outcome = None;
        self.battle_seed = battle_seed;

        for (index, id) in enemy_ids.iter().enumerate() {
            let definition = env.enemy(id)?;
            self.state
                .enemies
                .push(EnemyState::from_definition(CombatantId(index as u32 + 1), definition));
        }

        self.queue.enqueue(QueuedAction::after(
            self.config.start_delay_ticks,
            BattleCommand::Transition(SubPhase::EnemyStart),
        ));
        Ok(())
    }

    // ========================================================================
    // Host-facing surface
    // ========================================================================

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.outcome
    }

    /// Takes every notification published since the last drain.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        core::mem::take(&mut self.notifications)
    }

    /// Advances one logical tick, executing every queue action that
    /// completes this tick, in enqueue order.
    pub fn tick(&mut self, env: &ContentEnv<'_>) {
        if self.outcome.is_some() {
            return;
        }
        for command in self.queue.tick() {
            self.execute(command, env);
        }
    }

    /// Feeds an external signal: updates the progress ledger, releases
    /// pending damage on impact, and completes a matching queue wait.
    pub fn observe(&mut self, env: &ContentEnv<'_>, signal: &Signal) {
        if self.outcome.is_some() {
            return;
        }

        match signal {
            Signal::BlockAssigned { context, amount } => {
                if let Some(planned) = self.find_planned(*context) {
                    let base = planned.base_damage;
                    self.state.progress.note_block(*context, *amount, base);
                } else {
                    warn!(context = %context, "block assigned against unknown context");
                }
            }
            Signal::CardPlayed { context, color } => {
                if let Some(planned) = self.find_planned(*context) {
                    let base = planned.base_damage;
                    self.state.progress.note_card(*context, *color, base);
                } else {
                    warn!(context = %context, "card played against unknown context");
                }
            }
            Signal::AttackImpact { target, context } => {
                self.release_pending(*target, *context);
            }
            Signal::BuffAnimationDone { .. } | Signal::AbsorbAnimationDone { .. } => {}
        }

        for command in self.queue.observe(signal) {
            self.execute(command, env);
        }
        // A released impact can end the battle; stale waits must not fire.
        if self.outcome.is_some() {
            self.queue.clear();
        }
    }

    /// Requests a phase transition through the queue.
    pub fn request_transition(&mut self, sub: SubPhase) {
        self.request_transition_after(sub, 0);
    }

    pub fn request_transition_after(&mut self, sub: SubPhase, ticks: u32) {
        self.queue
            .enqueue(QueuedAction::after(ticks, BattleCommand::Transition(sub)));
    }

    /// Requests resolution of the planned attack with this context.
    pub fn request_resolution(&mut self, context: ContextId) {
        self.queue
            .enqueue(QueuedAction::after(0, BattleCommand::Resolve(context)));
    }

    /// Defers an arbitrary command behind a delay or signal wait.
    pub fn defer(&mut self, action: QueuedAction) {
        self.queue.enqueue(action);
    }

    /// Enqueues a command to run on the next drain, behind everything
    /// already queued.
    pub fn submit(&mut self, command: BattleCommand) {
        self.queue.enqueue(QueuedAction::after(0, command));
    }

    // ========================================================================
    // Command execution
    // ========================================================================

    fn execute(&mut self, command: BattleCommand, env: &ContentEnv<'_>) {
        if self.outcome.is_some() {
            return;
        }
        match command {
            BattleCommand::Transition(sub) => {
                let change = PhaseMachine::new(&mut self.state.phase).apply(sub);
                debug!(previous = %change.previous, current = %change.current, turn = change.turn, "phase changed");
                self.notifications.push(Notification::PhaseChanged {
                    previous: change.previous,
                    current: change.current,
                    turn: change.turn,
                });
                self.on_phase_changed(change, env);
            }
            BattleCommand::Resolve(context) => self.resolve_attack(context, env),
            BattleCommand::QueueHit {
                target,
                amount,
                context,
                kind,
                source,
            } => {
                self.state.pending.push(PendingHit {
                    target,
                    amount,
                    context,
                    kind,
                    source,
                });
            }
            BattleCommand::ModifyHp {
                target,
                delta,
                kind,
                source,
            } => self.modify_hp(target, delta as i64, kind, source),
            BattleCommand::AdjustPassive { owner, kind, delta } => {
                self.state.passives.adjust(owner, kind, delta);
                // Stun applied mid-enemy-turn consumes into the intent queue
                // immediately; the attack currently resolving is exempt.
                if kind == PassiveKind::Stun
                    && delta > 0
                    && let PassiveOwner::Combatant(enemy) = owner
                    && !enemy.is_player()
                    && matches!(
                        self.state.phase.sub,
                        SubPhase::PreBlock | SubPhase::Block | SubPhase::EnemyAttack
                    )
                {
                    let skip_resolving = self.state.phase.sub == SubPhase::EnemyAttack;
                    self.consume_stun(enemy, skip_resolving);
                }
            }
            BattleCommand::SetPassive {
                owner,
                kind,
                stacks,
            } => {
                self.state.passives.set(owner, kind, stacks);
            }
        }
    }

    // ========================================================================
    // Phase hooks
    // ========================================================================

    fn on_phase_changed(&mut self, change: PhaseChange, env: &ContentEnv<'_>) {
        match change.current {
            SubPhase::EnemyStart => {
                // Burn fires before planning so an enemy that burns to death
                // never telegraphs.
                let enemy_ids: Vec<CombatantId> =
                    self.state.enemies.iter().map(|e| e.id()).collect();
                for enemy in enemy_ids {
                    self.burn_tick(enemy);
                }
                if self.outcome.is_some() {
                    return;
                }
                self.planner.on_enemy_turn_start(
                    change.turn,
                    &mut self.state.enemies,
                    env,
                    self.battle_seed,
                    &mut self.notifications,
                );
            }
            SubPhase::PreBlock => {
                let enemy_ids: Vec<CombatantId> =
                    self.state.enemies.iter().map(|e| e.id()).collect();
                for enemy in enemy_ids {
                    self.consume_stun(enemy, false);
                }
            }
            SubPhase::EnemyEnd => self.flush_unresolved_intents(),
            SubPhase::PlayerStart => self.burn_tick(CombatantId::PLAYER),
            SubPhase::PlayerEnd => self.state.passives.end_of_turn_cleanup(),
            _ => {}
        }
    }

    /// Burn damages its own owner by the stack count and is not consumed.
    fn burn_tick(&mut self, owner: CombatantId) {
        let stacks = self.state.passives.stacks(owner, PassiveKind::Burn);
        if stacks == 0 {
            return;
        }
        self.notifications.push(Notification::PassiveTriggered {
            owner: PassiveOwner::Combatant(owner),
            kind: PassiveKind::Burn,
        });
        self.modify_hp(owner, -(stacks as i64), HitKind::Effect, None);
    }

    /// Marks leading unresolved attacks stunned, one stack each.
    ///
    /// `skip_resolving` exempts index 0: during the enemy's own attack
    /// phase the front attack is already resolving and cannot be stunned
    /// retroactively. During the player's block phases index 0 is eligible.
    fn consume_stun(&mut self, enemy_id: CombatantId, skip_resolving: bool) {
        let start = usize::from(skip_resolving);
        loop {
            if self.state.passives.stacks(enemy_id, PassiveKind::Stun) == 0 {
                break;
            }
            let Some(enemy) = self.state.enemy_mut(enemy_id) else {
                break;
            };
            let Some(attack) = enemy
                .intents
                .current
                .iter_mut()
                .skip(start)
                .find(|p| !p.is_stunned)
            else {
                break;
            };
            attack.is_stunned = true;
            self.state.passives.adjust(enemy_id, PassiveKind::Stun, -1);
            self.notifications.push(Notification::PassiveTriggered {
                owner: PassiveOwner::Combatant(enemy_id),
                kind: PassiveKind::Stun,
            });
        }

        // Consuming the last attack leaves the enemy turn with nothing to
        // do: chain straight through to the player's action phase.
        let all_stunned = self
            .state
            .enemy(enemy_id)
            .map(|e| {
                !e.intents.current.is_empty() && e.intents.current.iter().all(|p| p.is_stunned)
            })
            .unwrap_or(false);
        if all_stunned
            && matches!(
                self.state.phase.sub,
                SubPhase::PreBlock | SubPhase::Block | SubPhase::EnemyAttack
            )
        {
            let step = self.config.chain_step_ticks;
            self.request_transition_after(SubPhase::EnemyEnd, step);
            self.request_transition_after(SubPhase::PlayerStart, step);
            self.request_transition_after(SubPhase::Action, step);
        }
    }

    /// Discards whatever is left in the current queues at EnemyEnd.
    ///
    /// Stunned entries are the expected leftovers: displayed as skipped,
    /// never resolved. Anything else still present means a collaborator
    /// never requested its resolution.
    fn flush_unresolved_intents(&mut self) {
        let mut skipped = Vec::new();
        for enemy in &mut self.state.enemies {
            while let Some(planned) = enemy.intents.pop_front() {
                if !planned.is_stunned {
                    warn!(context = %planned.context, "unresolved attack discarded at EnemyEnd");
                }
                skipped.push(planned.context);
            }
        }
        for context in skipped {
            self.state.progress.discard(context);
            self.notifications
                .push(Notification::AttackSkipped { context });
        }
    }

    // ========================================================================
    // Resolution pipeline
    // ========================================================================

    fn resolve_attack(&mut self, context: ContextId, env: &ContentEnv<'_>) {
        let Some((enemy_index, position)) = self.locate_current(context) else {
            warn!(context = %context, "resolution requested for unknown context");
            return;
        };

        let (attack_id, base_damage, is_stunned) = {
            let planned = &self.state.enemies[enemy_index].intents.current[position];
            (planned.attack.clone(), planned.base_damage, planned.is_stunned)
        };

        if is_stunned {
            self.state.enemies[enemy_index].intents.current.remove(position);
            self.state.progress.discard(context);
            self.notifications
                .push(Notification::AttackSkipped { context });
            return;
        }

        let Some(definition) = env.attack(&attack_id) else {
            // Missing content: skip the action, never throw.
            warn!(attack = %attack_id, "resolving attack with no definition, skipping");
            self.state.enemies[enemy_index].intents.current.remove(position);
            self.state.progress.discard(context);
            return;
        };

        let record = self
            .state
            .progress
            .get(context)
            .cloned()
            .unwrap_or_else(|| AttackProgress::new(base_damage));
        let was_blocked = condition::evaluate(&definition.blocked_when, &record);

        let attacker = self.state.enemies[enemy_index].id();
        self.state.enemies[enemy_index].intents.current[position].was_blocked = was_blocked;

        for effect in &definition.on_hit {
            self.apply_attack_effect(attacker, base_damage, context, effect);
        }
        if !was_blocked {
            for effect in &definition.on_unblocked {
                self.apply_attack_effect(attacker, base_damage, context, effect);
            }
        }

        self.state.enemies[enemy_index].intents.current.remove(position);
        if !self.context_has_pending(context) {
            self.state.progress.discard(context);
        }
        self.notifications.push(Notification::AttackResolved {
            context,
            was_blocked,
        });
    }

    fn apply_attack_effect(
        &mut self,
        attacker: CombatantId,
        base_damage: u32,
        context: ContextId,
        effect: &AttackEffect,
    ) {
        match effect {
            AttackEffect::Strike { amount } => {
                self.state.pending.push(PendingHit {
                    target: CombatantId::PLAYER,
                    amount: amount.unwrap_or(base_damage),
                    context: Some(context),
                    kind: HitKind::Attack,
                    source: Some(attacker),
                });
            }
            AttackEffect::ApplyPassive {
                kind,
                stacks,
                target,
            } => {
                let owner = AttackEffect::owner_for(*target, attacker);
                self.state.passives.adjust(owner, *kind, *stacks as i32);
            }
            AttackEffect::GainStoredBlock { amount, target } => {
                let id = self.resolve_target(*target, attacker);
                if let Some(combatant) = self.state.combatant_mut(id) {
                    combatant.stored_block += amount;
                }
            }
            AttackEffect::ForceDiscard { count } => {
                self.notifications
                    .push(Notification::ForcedDiscard { count: *count });
            }
            AttackEffect::Heal { amount, target } => {
                let id = self.resolve_target(*target, attacker);
                self.modify_hp(id, *amount as i64, HitKind::Effect, None);
            }
        }
    }

    fn resolve_target(&self, target: EffectTarget, attacker: CombatantId) -> CombatantId {
        match target {
            EffectTarget::Player => CombatantId::PLAYER,
            EffectTarget::Attacker => attacker,
        }
    }

    // ========================================================================
    // Damage pipeline
    // ========================================================================

    /// Releases pending hits for `target` (optionally narrowed to one
    /// context) through the mitigation layers.
    fn release_pending(&mut self, target: CombatantId, context: Option<ContextId>) {
        let mut released = Vec::new();
        let mut index = 0;
        while index < self.state.pending.len() {
            let hit = &self.state.pending[index];
            let matches = hit.target == target
                && context.is_none_or(|wanted| hit.context == Some(wanted));
            if matches {
                released.push(self.state.pending.remove(index));
            } else {
                index += 1;
            }
        }

        for hit in released {
            self.land_hit(hit);
            if self.outcome.is_some() {
                return;
            }
        }
    }

    fn land_hit(&mut self, hit: PendingHit) {
        let BattleState {
            progress,
            passives,
            player,
            enemies,
            ..
        } = &mut self.state;

        let target_state = if hit.target.is_player() {
            Some(player)
        } else {
            enemies
                .iter_mut()
                .find(|e| e.id() == hit.target)
                .map(|e| &mut e.combatant)
        };
        let Some(target_state) = target_state else {
            warn!(target = %hit.target, "pending hit against unknown combatant dropped");
            return;
        };

        let mut record = hit.context.and_then(|c| progress.get_mut(c));
        let outcome = mitigate(hit.amount, record.as_deref_mut(), passives, target_state);

        if outcome.absorbed_by_aegis > 0 {
            self.notifications.push(Notification::PassiveTriggered {
                owner: PassiveOwner::Combatant(hit.target),
                kind: PassiveKind::Aegis,
            });
        }
        if outcome.hp_loss > 0 || hit.amount > 0 {
            self.notifications.push(Notification::DamageApplied {
                target: hit.target,
                amount: outcome.hp_loss,
                hp_before: outcome.hp_before,
                hp_after: outcome.hp_after,
            });
        }

        if let Some(context) = hit.context
            && !self.context_has_pending(context)
            && self.locate_current(context).is_none()
        {
            self.state.progress.discard(context);
        }

        if outcome.crossed_death_edge() {
            self.on_death(hit.target);
        }
    }

    /// Direct hit-point modification: passive-derived bonuses apply before
    /// clamping, bypassing the block layers entirely.
    fn modify_hp(
        &mut self,
        target: CombatantId,
        mut delta: i64,
        kind: HitKind,
        source: Option<CombatantId>,
    ) {
        if kind == HitKind::Attack
            && delta < 0
            && let Some(source) = source
        {
            let bonus = self
                .state
                .passives
                .drain(source, PassiveKind::DowseWithHolyWater);
            if bonus > 0 {
                delta -= bonus as i64;
                self.notifications.push(Notification::PassiveTriggered {
                    owner: PassiveOwner::Combatant(source),
                    kind: PassiveKind::DowseWithHolyWater,
                });
            }
        }

        let Some(combatant) = self.state.combatant_mut(target) else {
            warn!(target = %target, "hp modification against unknown combatant dropped");
            return;
        };
        let hp_before = combatant.hp.current();
        combatant.hp.apply(delta);
        let hp_after = combatant.hp.current();

        if hp_after < hp_before {
            self.notifications.push(Notification::DamageApplied {
                target,
                amount: hp_before - hp_after,
                hp_before,
                hp_after,
            });
        }
        if hp_before > 0 && hp_after == 0 {
            self.on_death(target);
        }
    }

    /// Death edge: fires exactly once per crossing, and is the only path
    /// that ends a battle.
    fn on_death(&mut self, combatant: CombatantId) {
        if combatant.is_player() {
            self.notifications.push(Notification::PlayerDied);
            self.end_battle(BattleOutcome::Defeat);
        } else {
            self.notifications
                .push(Notification::EnemyDefeated { enemy: combatant });
            if self.state.all_enemies_defeated() {
                self.notifications.push(Notification::Victory);
                self.end_battle(BattleOutcome::Victory);
            }
        }
    }

    fn end_battle(&mut self, outcome: BattleOutcome) {
        self.outcome = Some(outcome);
        // Discard stale transitions so they cannot fire into the next battle.
        self.queue.clear();
        self.state.pending.clear();
    }

    // ========================================================================
    // Lookup helpers
    // ========================================================================

    fn find_planned(&self, context: ContextId) -> Option<&crate::state::PlannedAttack> {
        self.state
            .enemies
            .iter()
            .find_map(|e| e.intents.find(context))
    }

    fn locate_current(&self, context: ContextId) -> Option<(usize, usize)> {
        self.state.enemies.iter().enumerate().find_map(|(ei, e)| {
            e.intents
                .current
                .iter()
                .position(|p| p.context == context)
                .map(|pos| (ei, pos))
        })
    }

    fn context_has_pending(&self, context: ContextId) -> bool {
        self.state
            .pending
            .iter()
            .any(|h| h.context == Some(context))
    }
}
