// Session directory: maps game ids to running brokers.

use crate::domain::{GameId, RegistryError};
use crate::use_cases::broker::{BrokerHandle, BrokerSettings, spawn_broker};
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, info};

/// Thread-safe registry of active game sessions.
///
/// The map lock is only held for the map operation itself; brokers are never
/// awaited while it is taken.
#[derive(Debug)]
pub struct BrokerRegistry {
    /// Settings applied to newly created brokers.
    settings: BrokerSettings,
    /// Map of game id to broker handle.
    brokers: Mutex<HashMap<GameId, BrokerHandle>>,
    /// Handed to every broker so it can report its own retirement.
    retired_tx: mpsc::UnboundedSender<GameId>,
}

impl BrokerRegistry {
    /// Creates the registry and spawns its cleanup task.
    pub fn new(settings: BrokerSettings) -> Arc<Self> {
        let (retired_tx, retired_rx) = mpsc::unbounded_channel();
        let registry = Arc::new(Self {
            settings,
            brokers: Mutex::new(HashMap::new()),
            retired_tx,
        });
        tokio::spawn(cleanup_task(Arc::downgrade(&registry), retired_rx));
        registry
    }

    /// Spawns a broker for `game_id` and stores it.
    pub async fn create(&self, game_id: GameId) -> Result<BrokerHandle, RegistryError> {
        let mut brokers = self.brokers.lock().await;
        if brokers.contains_key(&game_id) {
            return Err(RegistryError::AlreadyExists(game_id));
        }

        let broker = spawn_broker(game_id.clone(), &self.settings, self.retired_tx.clone());
        brokers.insert(game_id, broker.clone());
        Ok(broker)
    }

    /// Returns the broker for `game_id`, if the session is live.
    pub async fn lookup(&self, game_id: &str) -> Option<BrokerHandle> {
        let brokers = self.brokers.lock().await;
        brokers.get(game_id).cloned()
    }

    /// Drops the entry and retires its broker. Unknown ids are ignored.
    pub async fn remove(&self, game_id: &str) {
        let removed = self.brokers.lock().await.remove(game_id);
        if let Some(broker) = removed {
            broker.retire();
            debug!(%game_id, "game session removed");
        }
    }

    /// Number of registered sessions.
    pub async fn len(&self) -> usize {
        self.brokers.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Empties the registry and retires every broker, ending all open streams.
    pub async fn retire_all(&self) {
        let drained: Vec<BrokerHandle> = {
            let mut brokers = self.brokers.lock().await;
            brokers.drain().map(|(_, broker)| broker).collect()
        };
        info!(sessions = drained.len(), "retiring all game sessions");
        for broker in drained {
            broker.retire();
        }
    }

    // Removes the entry only if it still points at a retired broker.
    async fn forget_retired(&self, game_id: &GameId) {
        let mut brokers = self.brokers.lock().await;
        if brokers.get(game_id).is_some_and(BrokerHandle::is_retired) {
            brokers.remove(game_id);
            debug!(%game_id, "retired game session forgotten");
        }
    }
}

// Consumes retirement notices so brokers never touch the registry lock themselves.
async fn cleanup_task(
    registry: Weak<BrokerRegistry>,
    mut retired_rx: mpsc::UnboundedReceiver<GameId>,
) {
    while let Some(game_id) = retired_rx.recv().await {
        let Some(registry) = registry.upgrade() else {
            break;
        };
        registry.forget_retired(&game_id).await;
    }
}
