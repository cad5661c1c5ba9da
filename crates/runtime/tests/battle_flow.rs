//! End-to-end battle flow through the runtime handle.
//!
//! Drives the worker exactly the way presentation glue would: start a
//! battle, watch telegraphs, assign block, request resolution, emit impact
//! signals, and assert the outbound event sequence.

use std::time::Duration;

use tokio::sync::broadcast;

use battle_core::{
    BattleConfig, BattleOutcome, CombatantId, EnemyId, Signal, SubPhase,
};
use runtime::{
    BattleHandle, BattleSetup, CombatEvent, Event, IntentEvent, PhaseEvent, Runtime,
    RuntimeConfig, Topic,
};

async fn recv(rx: &mut broadcast::Receiver<Event>) -> Event {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for event")
        .expect("event bus closed")
}

async fn boot() -> BattleHandle {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let config = RuntimeConfig {
        battle: BattleConfig::immediate(),
        tick_interval: Duration::from_millis(1),
        ..RuntimeConfig::default()
    };
    Runtime::start(config).await.expect("runtime should start")
}

/// Subscriptions must exist before the battle starts or the opening
/// transition can slip past them.
async fn begin(handle: &BattleHandle, player_max_hp: u32) {
    handle
        .start_battle(BattleSetup {
            player_name: "Hero".into(),
            player_max_hp,
            enemies: vec![EnemyId::new("ghoul")],
            seed: 42,
        })
        .await
        .expect("battle should start");
}

#[tokio::test]
async fn blocked_attack_flow_keeps_the_player_unharmed() {
    let handle = boot().await;
    let mut phases = handle.subscribe(Topic::Phase);
    let mut intents = handle.subscribe(Topic::Intent);
    let mut combat = handle.subscribe(Topic::Combat);
    begin(&handle, 30).await;

    // The opening transition fires through the deferred queue.
    let Event::Phase(PhaseEvent::Changed {
        previous,
        current,
        turn,
    }) = recv(&mut phases).await
    else {
        panic!("expected a phase change");
    };
    assert_eq!(previous, SubPhase::StartBattle);
    assert_eq!(current, SubPhase::EnemyStart);
    assert_eq!(turn, 1);

    // The ghoul's pattern opens with Claw Swipe and previews Rotten Bite.
    let Event::Intent(IntentEvent::Telegraphed { context, name, .. }) = recv(&mut intents).await
    else {
        panic!("expected a telegraph");
    };
    assert_eq!(name, "Claw Swipe");
    let Event::Intent(IntentEvent::Telegraphed { name: preview, .. }) = recv(&mut intents).await
    else {
        panic!("expected the next-turn preview");
    };
    assert_eq!(preview, "Rotten Bite");

    // Six block meets Claw Swipe's blocked-condition exactly.
    handle
        .signal(Signal::BlockAssigned { context, amount: 6 })
        .await
        .unwrap();
    handle.request_resolution(context).await.unwrap();

    let Event::Combat(CombatEvent::Resolved {
        context: resolved,
        was_blocked,
    }) = recv(&mut combat).await
    else {
        panic!("expected a resolution");
    };
    assert_eq!(resolved, context);
    assert!(was_blocked);

    // Damage lands only on the impact frame, fully absorbed by the block.
    handle
        .signal(Signal::AttackImpact {
            target: CombatantId::PLAYER,
            context: Some(context),
        })
        .await
        .unwrap();
    let Event::Combat(CombatEvent::Damage {
        target, hp_after, ..
    }) = recv(&mut combat).await
    else {
        panic!("expected a damage report");
    };
    assert_eq!(target, CombatantId::PLAYER);
    assert_eq!(hp_after, 30);

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.state.player.hp.current(), 30);
    assert!(snapshot.outcome.is_none());
}

#[tokio::test]
async fn unblocked_lethal_attack_ends_the_battle() {
    let handle = boot().await;
    let mut intents = handle.subscribe(Topic::Intent);
    let mut lifecycle = handle.subscribe(Topic::Lifecycle);
    begin(&handle, 5).await;

    let Event::Intent(IntentEvent::Telegraphed { context, .. }) = recv(&mut intents).await else {
        panic!("expected a telegraph");
    };

    // No block assigned: Claw Swipe resolves unblocked for 6 damage.
    handle.request_resolution(context).await.unwrap();
    handle
        .signal(Signal::AttackImpact {
            target: CombatantId::PLAYER,
            context: Some(context),
        })
        .await
        .unwrap();

    let died = recv(&mut lifecycle).await;
    assert!(
        matches!(died, Event::Lifecycle(runtime::LifecycleEvent::PlayerDied)),
        "expected the death edge, got {died:?}"
    );

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.outcome, Some(BattleOutcome::Defeat));
    assert_eq!(snapshot.state.player.hp.current(), 0);
}

#[tokio::test]
async fn deferred_transition_waits_for_its_animation_signal() {
    use battle_core::{BattleCommand, QueuedAction, SignalFilter, SignalKind};

    let handle = boot().await;
    let mut phases = handle.subscribe(Topic::Phase);
    begin(&handle, 30).await;

    // Consume the opening EnemyStart transition.
    let Event::Phase(PhaseEvent::Changed { current, .. }) = recv(&mut phases).await else {
        panic!("expected a phase change");
    };
    assert_eq!(current, SubPhase::EnemyStart);

    // PreBlock is gated on the player's buff animation finishing.
    handle
        .defer(QueuedAction::on(
            SignalFilter::kind(SignalKind::BuffAnimationDone)
                .with_combatant(CombatantId::PLAYER),
            BattleCommand::Transition(SubPhase::PreBlock),
        ))
        .await
        .unwrap();

    // Plenty of ticks elapse; the wait must hold.
    tokio::time::sleep(Duration::from_millis(50)).await;
    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.state.phase.sub, SubPhase::EnemyStart);

    handle
        .signal(Signal::BuffAnimationDone {
            owner: CombatantId::PLAYER,
        })
        .await
        .unwrap();

    let Event::Phase(PhaseEvent::Changed { current, .. }) = recv(&mut phases).await else {
        panic!("expected a phase change");
    };
    assert_eq!(current, SubPhase::PreBlock);
}
