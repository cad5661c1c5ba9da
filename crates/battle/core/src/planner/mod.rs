//! Enemy intent planning.
//!
//! On each EnemyStart transition the planner promotes or repopulates every
//! enemy's intent queues and rolls ambush flags. Planning is guarded to run
//! at most once per distinct turn number, so phase chains can revisit
//! EnemyStart-adjacent states without double-planning.

mod archetype;

pub use archetype::Archetype;

use tracing::warn;

use crate::env::ContentEnv;
use crate::env::compute_seed;
use crate::events::Notification;
use crate::state::{AttackId, ContextId, EnemyState, IntentQueue, PlannedAttack, TurnNumber};

/// Populates the per-enemy intent queues.
pub struct IntentPlanner {
    last_planned: Option<TurnNumber>,
    next_context: u64,
}

impl IntentPlanner {
    pub fn new() -> Self {
        Self {
            last_planned: None,
            next_context: 1,
        }
    }

    /// Clears the per-battle guard. Context ids stay process-unique across
    /// battles.
    pub fn reset(&mut self) {
        self.last_planned = None;
    }

    fn fresh_context(&mut self) -> ContextId {
        let id = ContextId(self.next_context);
        self.next_context += 1;
        id
    }

    /// Runs turn planning for every enemy with an attack roster.
    ///
    /// For each enemy: promote `next` into `current` when the latter is
    /// empty (or, on the first turn, select directly into `current`), then
    /// clear and repopulate `next` with the strategy's selection for the
    /// upcoming turn.
    pub fn on_enemy_turn_start(
        &mut self,
        turn: TurnNumber,
        enemies: &mut [EnemyState],
        env: &ContentEnv<'_>,
        battle_seed: u64,
        out: &mut Vec<Notification>,
    ) {
        if self.last_planned == Some(turn) {
            return;
        }
        self.last_planned = Some(turn);

        for enemy in enemies.iter_mut().filter(|e| e.is_alive()) {
            if enemy.roster.is_empty() {
                continue;
            }

            if enemy.intents.current.is_empty() {
                if enemy.intents.next.is_empty() {
                    // First turn: no telegraphed preview exists yet, so the
                    // strategy selects directly into the current queue.
                    let selection = enemy.archetype.plan(&enemy.roster, turn);
                    enemy.intents.current = self.build_queue(
                        enemy.combatant.id,
                        enemy.ambush_chance,
                        &selection,
                        env,
                        battle_seed,
                        out,
                    );
                } else {
                    enemy.intents.promote();
                }
            }

            // Telegraph the upcoming turn.
            let selection = enemy.archetype.plan(&enemy.roster, turn + 1);
            enemy.intents.next = self.build_queue(
                enemy.combatant.id,
                enemy.ambush_chance,
                &selection,
                env,
                battle_seed,
                out,
            );
        }
    }

    /// Instantiates planned attacks for a strategy selection, skipping ids
    /// with no content record.
    fn build_queue(
        &mut self,
        enemy: crate::state::CombatantId,
        default_ambush: u32,
        selection: &[AttackId],
        env: &ContentEnv<'_>,
        battle_seed: u64,
        out: &mut Vec<Notification>,
    ) -> IntentQueue {
        let mut queue = IntentQueue::new();
        let mut step: u8 = 1;
        for attack_id in selection {
            let Some(definition) = env.attack(attack_id) else {
                warn!(attack = %attack_id, "skipping planned attack with no definition");
                continue;
            };

            let context = self.fresh_context();
            let chance = definition.ambush_chance.unwrap_or(default_ambush);
            let is_ambush =
                chance > 0 && env.rng().roll_d100(compute_seed(battle_seed, context.0)) <= chance;

            let planned = PlannedAttack::new(
                attack_id.clone(),
                context,
                step,
                definition.base_damage,
            )
            .with_ambush(is_ambush);

            if queue.try_push(planned).is_err() {
                warn!(enemy = %enemy, "intent queue full, dropping surplus selection");
                break;
            }

            out.push(Notification::IntentTelegraphed {
                enemy,
                attack: attack_id.clone(),
                context,
                step,
                name: definition.name.clone(),
                is_ambush,
            });
            step += 1;
        }
        queue
    }
}

impl Default for IntentPlanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;
    use crate::env::{
        AttackDefinition, AttackOracle, CardDefinition, CardOracle, EnemyDefinition, EnemyOracle,
        PcgRng,
    };

    use crate::state::{CardId, CombatantId, EnemyId};

    static RNG: PcgRng = PcgRng;

    struct Fixture {
        attacks: Vec<AttackDefinition>,
    }

    impl AttackOracle for Fixture {
        fn attack(&self, id: &AttackId) -> Option<&AttackDefinition> {
            self.attacks.iter().find(|a| &a.id == id)
        }
    }

    impl EnemyOracle for Fixture {
        fn enemy(&self, _id: &EnemyId) -> Option<&EnemyDefinition> {
            None
        }
    }

    impl CardOracle for Fixture {
        fn card(&self, _id: &CardId) -> Option<&CardDefinition> {
            None
        }
    }

    fn attack(id: &str, ambush: Option<u32>) -> AttackDefinition {
        AttackDefinition {
            id: AttackId::new(id),
            name: id.to_uppercase(),
            base_damage: 4,
            blocked_when: Condition::All(vec![]),
            on_hit: vec![],
            on_unblocked: vec![],
            ambush_chance: ambush,
        }
    }

    fn enemy(roster: &[&str]) -> EnemyState {
        let definition = EnemyDefinition {
            id: EnemyId::new("ghoul"),
            name: "Ghoul".into(),
            max_hp: 20,
            archetype: Archetype::Pattern,
            roster: roster.iter().map(|id| AttackId::new(*id)).collect(),
            ambush_chance: 0,
        };
        EnemyState::from_definition(CombatantId(1), &definition)
    }

    #[test]
    fn first_turn_fills_both_queues() {
        let fixture = Fixture {
            attacks: vec![attack("claw", None), attack("bite", None)],
        };
        let env = ContentEnv::new(&fixture, &fixture, &fixture, &RNG);
        let mut enemies = vec![enemy(&["claw", "bite"])];
        let mut planner = IntentPlanner::new();
        let mut out = Vec::new();

        planner.on_enemy_turn_start(1, &mut enemies, &env, 7, &mut out);

        assert_eq!(enemies[0].intents.current.len(), 1);
        assert_eq!(enemies[0].intents.next.len(), 1);
        assert_eq!(enemies[0].intents.current[0].attack.0, "claw");
        assert_eq!(enemies[0].intents.next[0].attack.0, "bite");
        // One telegraph per planned attack, both queues.
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn planning_is_guarded_per_turn() {
        let fixture = Fixture {
            attacks: vec![attack("claw", None)],
        };
        let env = ContentEnv::new(&fixture, &fixture, &fixture, &RNG);
        let mut enemies = vec![enemy(&["claw"])];
        let mut planner = IntentPlanner::new();
        let mut out = Vec::new();

        planner.on_enemy_turn_start(1, &mut enemies, &env, 7, &mut out);
        let planned = enemies[0].intents.clone();
        planner.on_enemy_turn_start(1, &mut enemies, &env, 7, &mut out);
        assert_eq!(enemies[0].intents, planned);
    }

    #[test]
    fn promotion_consumes_the_preview() {
        let fixture = Fixture {
            attacks: vec![attack("claw", None), attack("bite", None)],
        };
        let env = ContentEnv::new(&fixture, &fixture, &fixture, &RNG);
        let mut enemies = vec![enemy(&["claw", "bite"])];
        let mut planner = IntentPlanner::new();
        let mut out = Vec::new();

        planner.on_enemy_turn_start(1, &mut enemies, &env, 7, &mut out);
        let previewed = enemies[0].intents.next[0].context;

        // Turn 1's attacks resolve away.
        enemies[0].intents.current.clear();

        planner.on_enemy_turn_start(2, &mut enemies, &env, 7, &mut out);
        assert_eq!(enemies[0].intents.current[0].context, previewed);
        assert_eq!(enemies[0].intents.next[0].attack.0, "claw");
    }

    #[test]
    fn missing_definitions_are_skipped() {
        let fixture = Fixture {
            attacks: vec![attack("claw", None)],
        };
        let env = ContentEnv::new(&fixture, &fixture, &fixture, &RNG);
        let mut enemies = vec![enemy(&["phantom", "claw"])];
        let mut planner = IntentPlanner::new();
        let mut out = Vec::new();

        planner.on_enemy_turn_start(1, &mut enemies, &env, 7, &mut out);
        assert_eq!(enemies[0].intents.current.len(), 1);
        assert_eq!(enemies[0].intents.current[0].attack.0, "claw");
    }

    #[test]
    fn ambush_rolls_are_deterministic() {
        let fixture = Fixture {
            attacks: vec![attack("claw", Some(100)), attack("bite", Some(0))],
        };
        let env = ContentEnv::new(&fixture, &fixture, &fixture, &RNG);
        let mut planner = IntentPlanner::new();
        let mut out = Vec::new();

        let mut enemies = vec![enemy(&["claw", "bite"])];
        planner.on_enemy_turn_start(1, &mut enemies, &env, 7, &mut out);
        // 100% chance always ambushes, 0% never does.
        assert!(enemies[0].intents.current[0].is_ambush);
        assert!(!enemies[0].intents.next[0].is_ambush);
    }
}
