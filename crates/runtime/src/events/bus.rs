//! Topic-based event bus implementation.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{CombatEvent, IntentEvent, LifecycleEvent, PhaseEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Phase transitions and turn counting
    Phase,
    /// Telegraphs and skipped attacks
    Intent,
    /// Resolution, passives, damage numbers
    Combat,
    /// Death edges and battle end
    Lifecycle,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Phase(PhaseEvent),
    Intent(IntentEvent),
    Combat(CombatEvent),
    Lifecycle(LifecycleEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Phase(_) => Topic::Phase,
            Event::Intent(_) => Topic::Intent,
            Event::Combat(_) => Topic::Combat,
            Event::Lifecycle(_) => Topic::Lifecycle,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive events
/// they care about. The topic set is fixed, so the channel map is built once
/// and shared immutably.
pub struct EventBus {
    channels: Arc<HashMap<Topic, broadcast::Sender<Event>>>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let mut channels = HashMap::new();
        for topic in [Topic::Phase, Topic::Intent, Topic::Combat, Topic::Lifecycle] {
            channels.insert(topic, broadcast::channel(capacity).0);
        }
        Self {
            channels: Arc::new(channels),
        }
    }

    /// Publish an event to its corresponding topic
    ///
    /// Best-effort: a topic with no subscribers simply drops the event.
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if let Some(tx) = self.channels.get(&topic)
            && tx.send(event).is_err()
        {
            tracing::trace!("no subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels
            .get(&topic)
            .expect("topic channel not initialized")
            .subscribe()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            channels: Arc::clone(&self.channels),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
