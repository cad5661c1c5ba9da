//! Cloneable command handle for the battle worker.

use tokio::sync::{mpsc, oneshot};

use battle_core::{BattleCommand, ContextId, EnemyId, QueuedAction, Signal, SubPhase};

use crate::error::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::worker::{BattleSnapshot, Command};

/// Parameters for starting one battle.
#[derive(Clone, Debug)]
pub struct BattleSetup {
    pub player_name: String,
    pub player_max_hp: u32,
    pub enemies: Vec<EnemyId>,
    pub seed: u64,
}

/// Handle used by hosts (presentation, input glue, tests) to drive a battle.
#[derive(Clone)]
pub struct BattleHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl BattleHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Resets state and begins a battle.
    pub async fn start_battle(&self, setup: BattleSetup) -> Result<()> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::StartBattle {
            player_name: setup.player_name,
            player_max_hp: setup.player_max_hp,
            enemies: setup.enemies,
            seed: setup.seed,
            reply,
        })
        .await?;
        rx.await.map_err(|_| RuntimeError::WorkerGone)??;
        Ok(())
    }

    /// Feeds an external signal (impact frames, animation completions,
    /// card plays, block assignments).
    pub async fn signal(&self, signal: Signal) -> Result<()> {
        self.send(Command::Signal(signal)).await
    }

    /// Enqueues a gameplay command behind everything already queued.
    pub async fn submit(&self, command: BattleCommand) -> Result<()> {
        self.send(Command::Submit(command)).await
    }

    /// Requests a phase transition through the deferred queue.
    pub async fn request_transition(&self, sub: SubPhase) -> Result<()> {
        self.request_transition_after(sub, 0).await
    }

    pub async fn request_transition_after(&self, sub: SubPhase, delay_ticks: u32) -> Result<()> {
        self.send(Command::RequestTransition { sub, delay_ticks })
            .await
    }

    /// Requests resolution of the planned attack with this context.
    pub async fn request_resolution(&self, context: ContextId) -> Result<()> {
        self.send(Command::RequestResolution { context }).await
    }

    /// Defers a command behind a delay or signal wait.
    pub async fn defer(&self, action: QueuedAction) -> Result<()> {
        self.send(Command::Defer(action)).await
    }

    /// Fetches a read-only snapshot of the battle.
    pub async fn snapshot(&self) -> Result<BattleSnapshot> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::QueryState { reply }).await?;
        rx.await.map_err(|_| RuntimeError::WorkerGone)
    }

    /// Subscribes to one bus topic.
    pub fn subscribe(&self, topic: Topic) -> tokio::sync::broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    async fn send(&self, command: Command) -> Result<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| RuntimeError::WorkerGone)
    }
}
