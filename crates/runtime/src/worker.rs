//! Battle worker that owns the authoritative [`BattleDirector`].
//!
//! Receives commands from [`crate::handle::BattleHandle`], drives the
//! director tick loop, and publishes drained notifications to the event bus.
//! The director itself stays single-threaded and synchronous; this task is
//! the only place it is ever touched.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use battle_core::{
    BattleCommand, BattleDirector, BattleOutcome, BattleState, ContextId, DirectorError, EnemyId,
    PcgRng, QueuedAction, Signal, SubPhase,
};
use battle_content::ContentLibrary;

use crate::events::{EventBus, event_for};

/// Commands that can be sent to the battle worker
pub enum Command {
    /// Reset state and begin a battle against the given enemies.
    StartBattle {
        player_name: String,
        player_max_hp: u32,
        enemies: Vec<EnemyId>,
        seed: u64,
        reply: oneshot::Sender<Result<(), DirectorError>>,
    },
    /// Feed an external signal (animation completions, card/block input).
    Signal(Signal),
    /// Enqueue a gameplay command behind everything already queued.
    Submit(BattleCommand),
    /// Request a phase transition after a tick delay.
    RequestTransition { sub: SubPhase, delay_ticks: u32 },
    /// Request resolution of a planned attack.
    RequestResolution { context: ContextId },
    /// Defer an arbitrary command behind a delay or signal wait.
    Defer(QueuedAction),
    /// Query the current battle state (read-only snapshot).
    QueryState {
        reply: oneshot::Sender<BattleSnapshot>,
    },
}

/// Read-only copy of the battle for inspection and rendering.
#[derive(Clone, Debug)]
pub struct BattleSnapshot {
    pub state: BattleState,
    pub outcome: Option<BattleOutcome>,
}

/// Background task that processes battle commands and ticks the director.
pub struct BattleWorker {
    director: BattleDirector,
    content: ContentLibrary,
    rng: PcgRng,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    tick_interval: Duration,
}

impl BattleWorker {
    pub fn new(
        director: BattleDirector,
        content: ContentLibrary,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        tick_interval: Duration,
    ) -> Self {
        Self {
            director,
            content,
            rng: PcgRng,
            command_rx,
            event_bus,
            tick_interval,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        let mut ticker = tokio::time::interval(self.tick_interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                Some(command) = self.command_rx.recv() => {
                    self.handle_command(command);
                    self.publish_drained();
                }
                _ = ticker.tick() => {
                    {
                        let env = self.content.env(&self.rng);
                        self.director.tick(&env);
                    }
                    self.publish_drained();
                }
                else => break,
            }
        }
        debug!("battle worker stopped: command channel closed");
    }

    fn handle_command(&mut self, command: Command) {
        let env = self.content.env(&self.rng);
        match command {
            Command::StartBattle {
                player_name,
                player_max_hp,
                enemies,
                seed,
                reply,
            } => {
                let result =
                    self.director
                        .begin_battle(&env, &player_name, player_max_hp, &enemies, seed);
                if reply.send(result).is_err() {
                    debug!("StartBattle reply channel closed (caller dropped)");
                }
            }
            Command::Signal(signal) => self.director.observe(&env, &signal),
            Command::Submit(command) => self.director.submit(command),
            Command::RequestTransition { sub, delay_ticks } => {
                self.director.request_transition_after(sub, delay_ticks);
            }
            Command::RequestResolution { context } => self.director.request_resolution(context),
            Command::Defer(action) => self.director.defer(action),
            Command::QueryState { reply } => {
                let snapshot = BattleSnapshot {
                    state: self.director.state().clone(),
                    outcome: self.director.outcome(),
                };
                if reply.send(snapshot).is_err() {
                    debug!("QueryState reply channel closed (caller dropped)");
                }
            }
        }
    }

    /// Fans out every notification the director produced since last drain.
    fn publish_drained(&mut self) {
        for notification in self.director.drain_notifications() {
            self.event_bus.publish(event_for(notification));
        }
    }
}
