//! Event bus actor
//!
//! A single task owns the observer registry. Publishers, new observers and
//! departing observers all talk to it through one command queue, so the
//! registry needs no lock.

use super::types::Event;
use crate::config::EventsConfig;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, warn};

/// Identifier of a connected observer
pub type ObserverId = u64;

enum BusCommand {
    Register {
        id: ObserverId,
        outbox: mpsc::Sender<Arc<str>>,
    },
    Unregister(ObserverId),
    Broadcast(Event),
    Count(oneshot::Sender<usize>),
}

/// Handle to the event bus; cheap to clone
#[derive(Clone)]
pub struct EventBus {
    commands: mpsc::Sender<BusCommand>,
    next_id: Arc<AtomicU64>,
    observer_buffer: usize,
}

impl EventBus {
    /// Start the bus loop on the current Tokio runtime
    ///
    /// The loop stops once every `EventBus` clone has been dropped.
    pub fn new(config: &EventsConfig) -> Self {
        let (commands, receiver) = mpsc::channel(config.queue_capacity.max(1));
        tokio::spawn(Self::run(receiver));

        Self {
            commands,
            next_id: Arc::new(AtomicU64::new(1)),
            observer_buffer: config.observer_buffer.max(1),
        }
    }

    async fn run(mut receiver: mpsc::Receiver<BusCommand>) {
        let mut observers: HashMap<ObserverId, mpsc::Sender<Arc<str>>> = HashMap::new();

        while let Some(command) = receiver.recv().await {
            match command {
                BusCommand::Register { id, outbox } => {
                    observers.insert(id, outbox);
                    debug!(observer = id, total = observers.len(), "Observer connected");
                }
                BusCommand::Unregister(id) => {
                    if observers.remove(&id).is_some() {
                        debug!(observer = id, total = observers.len(), "Observer disconnected");
                    }
                }
                BusCommand::Broadcast(event) => {
                    let message: Arc<str> = match serde_json::to_string(&event) {
                        Ok(json) => json.into(),
                        Err(e) => {
                            error!("Failed to serialize event: {}", e);
                            continue;
                        }
                    };

                    // never wait on an observer: a full or closed outbox drops it
                    observers.retain(|id, outbox| match outbox.try_send(Arc::clone(&message)) {
                        Ok(()) => true,
                        Err(TrySendError::Full(_)) => {
                            warn!(observer = *id, "Observer fell behind, disconnecting it");
                            false
                        }
                        Err(TrySendError::Closed(_)) => {
                            debug!(observer = *id, "Observer gone, removing it");
                            false
                        }
                    });
                }
                BusCommand::Count(reply) => {
                    let _ = reply.send(observers.len());
                }
            }
        }

        debug!("Event bus stopped");
    }

    /// Publish an event to every connected observer
    ///
    /// Never fails: a closed bus only logs a warning.
    pub async fn publish(&self, event: Event) {
        debug!(kind = ?event.kind, level = ?event.level, "{}", event.message);

        if self.commands.send(BusCommand::Broadcast(event)).await.is_err() {
            warn!("Event bus is closed, event dropped");
        }
    }

    /// Connect a new observer
    ///
    /// The observer receives every event published after this call returns.
    pub async fn subscribe(&self) -> ObserverHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (outbox, inbox) = mpsc::channel(self.observer_buffer);

        if self
            .commands
            .send(BusCommand::Register { id, outbox })
            .await
            .is_err()
        {
            warn!(observer = id, "Event bus is closed, observer will receive nothing");
        }

        ObserverHandle { id, inbox }
    }

    /// Disconnect an observer
    pub async fn unsubscribe(&self, handle: ObserverHandle) {
        let _ = self.commands.send(BusCommand::Unregister(handle.id)).await;
    }

    /// Number of currently connected observers
    pub async fn observer_count(&self) -> usize {
        let (reply, answer) = oneshot::channel();
        if self.commands.send(BusCommand::Count(reply)).await.is_err() {
            return 0;
        }
        answer.await.unwrap_or(0)
    }
}

/// Receiving end of one observer
#[derive(Debug)]
pub struct ObserverHandle {
    id: ObserverId,
    inbox: mpsc::Receiver<Arc<str>>,
}

impl ObserverHandle {
    pub fn id(&self) -> ObserverId {
        self.id
    }

    /// Next serialized event; `None` once the bus dropped this observer
    pub async fn recv(&mut self) -> Option<Arc<str>> {
        self.inbox.recv().await
    }

    /// Next serialized event if one is already buffered
    pub fn try_recv(&mut self) -> Option<Arc<str>> {
        self.inbox.try_recv().ok()
    }
}
