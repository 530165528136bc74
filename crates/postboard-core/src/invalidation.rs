//! Query invalidation bus.
//!
//! A one-way staleness signal: publishers announce that a query's cached data
//! is stale, subscribers decide when to re-fetch. Nothing but the key travels
//! on the bus, never the data itself.

use postboard_types::QueryKey;
use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 64;

/// Broadcast channel of [`QueryKey`]s.
#[derive(Debug, Clone)]
pub struct InvalidationBus {
    tx: broadcast::Sender<QueryKey>,
}

impl Default for InvalidationBus {
    fn default() -> Self {
        Self::new()
    }
}

impl InvalidationBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Marks `key` stale for every current subscriber.
    ///
    /// Returns the number of subscribers that received the signal. Publishing
    /// with no subscribers is not an error.
    pub fn invalidate(&self, key: QueryKey) -> usize {
        let delivered = self.tx.send(key).unwrap_or(0);
        tracing::debug!(%key, delivered, "query invalidated");
        delivered
    }

    pub fn subscribe(&self) -> InvalidationSubscriber {
        InvalidationSubscriber {
            rx: self.tx.subscribe(),
        }
    }
}

/// Receiving half of the bus.
#[derive(Debug)]
pub struct InvalidationSubscriber {
    rx: broadcast::Receiver<QueryKey>,
}

impl InvalidationSubscriber {
    /// Drains pending keys without blocking.
    ///
    /// If the subscriber lagged behind and dropped signals, every key is
    /// reported once so nothing stays stale.
    pub fn drain(&mut self) -> Vec<QueryKey> {
        let mut keys = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(key) => {
                    if !keys.contains(&key) {
                        keys.push(key);
                    }
                }
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "invalidation subscriber lagged");
                    for key in [QueryKey::Posts, QueryKey::Session] {
                        if !keys.contains(&key) {
                            keys.push(key);
                        }
                    }
                }
                Err(
                    broadcast::error::TryRecvError::Empty | broadcast::error::TryRecvError::Closed,
                ) => break,
            }
        }
        keys
    }

    /// Waits for the next key. Returns `None` once every sender is gone.
    pub async fn recv(&mut self) -> Option<QueryKey> {
        loop {
            match self.rx.recv().await {
                Ok(key) => return Some(key),
                Err(broadcast::error::RecvError::Lagged(_)) => {}
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
