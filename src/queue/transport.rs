//! Queue transport driving a [`KeyedStore`].

use crate::{error::DeliveryError, transport::Transport};

use super::{
    config::{EVENT_TTL_SECS, QUEUE_LIST, QueueConfig, event_key},
    event_id::EventIdGenerator,
    store::{KeyedStore, connect_store},
};

/// Enqueues events into a keyed store with expiry plus an index list.
pub struct QueueTransport<S: KeyedStore = redis::Connection> {
    store: S,
    ids: EventIdGenerator,
}

impl QueueTransport<redis::Connection> {
    /// Connect to the redis store described by `config`.
    pub fn connect(config: &QueueConfig) -> Result<Self, DeliveryError> {
        let store = connect_store(config)?;
        log::debug!(
            "connected queue transport to {}:{} db {}",
            config.host,
            config.port,
            config.db
        );
        Ok(Self::new(store))
    }
}

impl<S: KeyedStore> QueueTransport<S> {
    /// Wrap an existing store connection.
    pub fn new(store: S) -> Self {
        Self {
            store,
            ids: EventIdGenerator::new(),
        }
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Store `payload` under a fresh id and return that id.
    ///
    /// The body and its expiry are stored before the id is published.
    pub fn enqueue(&mut self, payload: &str) -> Result<String, DeliveryError> {
        let id = self.ids.next_id();
        let key = event_key(&id);
        self.store.set(&key, payload)?;
        self.store.expire(&key, EVENT_TTL_SECS)?;
        self.store.lpush(QUEUE_LIST, &id)?;
        Ok(id)
    }
}

impl<S: KeyedStore> Transport for QueueTransport<S> {
    fn deliver(&mut self, payload: &str) -> Result<(), DeliveryError> {
        self.enqueue(payload).map(|_| ())
    }

    fn label(&self) -> &'static str {
        "queue"
    }
}
