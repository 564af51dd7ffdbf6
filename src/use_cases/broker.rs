// Per-session fan-out: one task owns the subscriber set and processes every
// register/unregister/publish in inbox order.

use crate::domain::{BrokerError, GameId, SubscriberId};
use futures::Stream;
use std::collections::HashMap;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// Event payload as delivered to viewers. Shared so fan-out never copies the text.
pub type Payload = Arc<str>;

/// Settings applied to every broker spawned by the registry.
#[derive(Debug, Clone)]
pub struct BrokerSettings {
    /// Buffer size of each subscriber channel.
    pub subscriber_channel_capacity: usize,
    /// Retire the broker once its last subscriber has left.
    pub retire_when_empty: bool,
}

enum Command {
    Register {
        id: SubscriberId,
        tx: mpsc::Sender<Payload>,
        ack: oneshot::Sender<()>,
    },
    Unregister {
        id: SubscriberId,
    },
    Publish {
        payload: Payload,
    },
    SubscriberCount {
        reply: oneshot::Sender<usize>,
    },
    Retire,
}

/// Cloneable handle to a running broker task.
#[derive(Debug, Clone)]
pub struct BrokerHandle {
    game_id: GameId,
    commands: mpsc::UnboundedSender<Command>,
    subscriber_channel_capacity: usize,
}

/// Spawns the broker loop for `game_id` and returns its handle.
///
/// `retired_tx` receives the game id once the loop has stopped, which is how the
/// registry learns that the entry can be dropped.
pub fn spawn_broker(
    game_id: GameId,
    settings: &BrokerSettings,
    retired_tx: mpsc::UnboundedSender<GameId>,
) -> BrokerHandle {
    let (commands, inbox) = mpsc::unbounded_channel();
    tokio::spawn(broker_task(
        game_id.clone(),
        inbox,
        settings.retire_when_empty,
        retired_tx,
    ));

    BrokerHandle {
        game_id,
        commands,
        subscriber_channel_capacity: settings.subscriber_channel_capacity.max(1),
    }
}

impl BrokerHandle {
    pub fn game_id(&self) -> &GameId {
        &self.game_id
    }

    /// Adds `tx` to the active set and waits until the loop has applied it.
    ///
    /// Registering an id that is already present is ignored by the loop; the
    /// first channel stays in place.
    pub async fn register(
        &self,
        id: SubscriberId,
        tx: mpsc::Sender<Payload>,
    ) -> Result<(), BrokerError> {
        let (ack, applied) = oneshot::channel();
        self.commands
            .send(Command::Register { id, tx, ack })
            .map_err(|_| BrokerError::Retired)?;
        // The ack is dropped unanswered when the loop stops with the command queued.
        applied.await.map_err(|_| BrokerError::Retired)
    }

    /// Removes a channel from the active set. Unknown ids and retired brokers are no-ops.
    pub fn unregister(&self, id: SubscriberId) {
        let _ = self.commands.send(Command::Unregister { id });
    }

    /// Queues `payload` for every channel registered when the loop reaches it.
    pub fn publish(&self, payload: impl Into<Payload>) -> Result<(), BrokerError> {
        self.commands
            .send(Command::Publish {
                payload: payload.into(),
            })
            .map_err(|_| BrokerError::Retired)
    }

    /// Creates a subscriber channel, registers it and hands back the receiving side.
    ///
    /// The returned [`Subscription`] unregisters itself when dropped, including when
    /// this future is cancelled before registration completes.
    pub async fn subscribe(&self, id: SubscriberId) -> Result<Subscription, BrokerError> {
        let (tx, rx) = mpsc::channel(self.subscriber_channel_capacity);
        let subscription = Subscription {
            id,
            game_id: self.game_id.clone(),
            rx,
            commands: self.commands.clone(),
        };
        self.register(id, tx).await?;
        Ok(subscription)
    }

    /// Number of active subscribers, as seen after every command queued before this call.
    pub async fn subscriber_count(&self) -> Result<usize, BrokerError> {
        let (reply, count) = oneshot::channel();
        self.commands
            .send(Command::SubscriberCount { reply })
            .map_err(|_| BrokerError::Retired)?;
        count.await.map_err(|_| BrokerError::Retired)
    }

    /// Asks the loop to stop. Open subscriptions end once it does.
    pub fn retire(&self) {
        let _ = self.commands.send(Command::Retire);
    }

    pub fn is_retired(&self) -> bool {
        self.commands.is_closed()
    }
}

/// Receiving side of one registered subscriber channel.
///
/// Yields payloads until the broker retires. Dropping it unregisters the channel.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriberId,
    game_id: GameId,
    rx: mpsc::Receiver<Payload>,
    commands: mpsc::UnboundedSender<Command>,
}

impl Subscription {
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    pub async fn recv(&mut self) -> Option<Payload> {
        self.rx.recv().await
    }
}

impl Stream for Subscription {
    type Item = Payload;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Payload>> {
        self.rx.poll_recv(cx)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        // Queued before the receiver goes away, so a broker blocked on this
        // channel is released by the drop that follows.
        let _ = self.commands.send(Command::Unregister { id: self.id });
        debug!(game_id = %self.game_id, subscriber_id = %self.id, "subscription dropped");
    }
}

async fn broker_task(
    game_id: GameId,
    mut inbox: mpsc::UnboundedReceiver<Command>,
    retire_when_empty: bool,
    retired_tx: mpsc::UnboundedSender<GameId>,
) {
    let mut subscribers: HashMap<SubscriberId, mpsc::Sender<Payload>> = HashMap::new();
    info!(%game_id, "broker started");

    while let Some(command) = inbox.recv().await {
        match command {
            Command::Register { id, tx, ack } => {
                if subscribers.contains_key(&id) {
                    warn!(%game_id, subscriber_id = %id, "duplicate registration ignored");
                } else {
                    subscribers.insert(id, tx);
                    debug!(
                        %game_id,
                        subscriber_id = %id,
                        subscribers = subscribers.len(),
                        "subscriber registered"
                    );
                }
                let _ = ack.send(());
            }
            Command::Unregister { id } => {
                if subscribers.remove(&id).is_none() {
                    continue;
                }
                debug!(
                    %game_id,
                    subscriber_id = %id,
                    subscribers = subscribers.len(),
                    "subscriber unregistered"
                );
                if retire_when_empty && subscribers.is_empty() {
                    info!(%game_id, "last subscriber left");
                    break;
                }
            }
            Command::Publish { payload } => {
                let dropped = fan_out(&game_id, &mut subscribers, payload).await;
                if dropped > 0 && retire_when_empty && subscribers.is_empty() {
                    info!(%game_id, "last subscriber went away");
                    break;
                }
            }
            Command::SubscriberCount { reply } => {
                let _ = reply.send(subscribers.len());
            }
            Command::Retire => break,
        }
    }

    // Reject further commands right away; anything still queued is dropped
    // with the receiver, which fails pending register acks.
    inbox.close();
    subscribers.clear();
    info!(%game_id, "broker retired");
    let _ = retired_tx.send(game_id);
}

// Sends one payload to every subscriber in turn. A full buffer holds up this
// session only. Returns how many closed channels were pruned.
async fn fan_out(
    game_id: &GameId,
    subscribers: &mut HashMap<SubscriberId, mpsc::Sender<Payload>>,
    payload: Payload,
) -> usize {
    let mut closed = Vec::new();
    for (id, tx) in subscribers.iter() {
        if tx.send(payload.clone()).await.is_err() {
            closed.push(*id);
        }
    }

    for id in &closed {
        subscribers.remove(id);
        debug!(%game_id, subscriber_id = %id, "pruned closed subscriber channel");
    }
    closed.len()
}
