//! Runtime assembly: content loading, worker spawn, handle wiring.

use tokio::sync::mpsc;
use tracing::info;

use battle_core::BattleDirector;
use battle_content::ContentLibrary;

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::events::EventBus;
use crate::handle::BattleHandle;
use crate::worker::BattleWorker;

/// Entry point for hosts.
pub struct Runtime;

impl Runtime {
    /// Loads the embedded content set, spawns the battle worker, and
    /// returns the handle that drives it.
    pub async fn start(config: RuntimeConfig) -> Result<BattleHandle> {
        let content =
            ContentLibrary::load().map_err(|e| RuntimeError::Content(e.to_string()))?;
        info!(
            attacks = content.attacks.len(),
            enemies = content.enemies.len(),
            cards = content.cards.len(),
            "content loaded"
        );

        let event_bus = EventBus::with_capacity(config.event_capacity);
        let (command_tx, command_rx) = mpsc::channel(config.command_capacity);

        let director = BattleDirector::new(config.battle.clone());
        let worker = BattleWorker::new(
            director,
            content,
            command_rx,
            event_bus.clone(),
            config.tick_interval,
        );
        tokio::spawn(worker.run());

        Ok(BattleHandle::new(command_tx, event_bus))
    }
}
