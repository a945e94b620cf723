//! In-memory stand-in for the redis queue store.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::{error::DeliveryError, queue::KeyedStore};

#[derive(Default)]
struct Contents {
    values: HashMap<String, String>,
    ttls: HashMap<String, u64>,
    lists: HashMap<String, VecDeque<String>>,
    commands: usize,
    unreachable: bool,
}

/// Keyed store that records `SET`, `EXPIRE` and `LPUSH` in memory.
///
/// Clones share state, mirroring several connections to one server.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Contents>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Value stored under `key`.
    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.lock().values.get(key).cloned()
    }

    /// Expiry in seconds set on `key`.
    pub fn ttl(&self, key: &str) -> Option<u64> {
        self.inner.lock().ttls.get(key).copied()
    }

    /// Contents of list `name`, head first.
    pub fn list(&self, name: &str) -> Vec<String> {
        self.inner
            .lock()
            .lists
            .get(name)
            .map(|items| items.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Keys starting with `prefix`, sorted.
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        let mut keys: Vec<String> = self
            .inner
            .lock()
            .values
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect();
        keys.sort();
        keys
    }

    /// Number of commands received, rejected ones included.
    pub fn commands(&self) -> usize {
        self.inner.lock().commands
    }

    /// Reject every following command as if the server went away.
    pub fn make_unreachable(&self) {
        self.inner.lock().unreachable = true;
    }

    fn apply(&self, op: impl FnOnce(&mut Contents)) -> Result<(), DeliveryError> {
        let mut inner = self.inner.lock();
        inner.commands += 1;
        if inner.unreachable {
            return Err(DeliveryError::Store(redis::RedisError::from((
                redis::ErrorKind::IoError,
                "connection refused",
            ))));
        }
        op(&mut *inner);
        Ok(())
    }
}

impl KeyedStore for MemoryStore {
    fn set(&mut self, key: &str, value: &str) -> Result<(), DeliveryError> {
        self.apply(|c| {
            c.values.insert(key.to_owned(), value.to_owned());
        })
    }

    fn expire(&mut self, key: &str, seconds: u64) -> Result<(), DeliveryError> {
        self.apply(|c| {
            if c.values.contains_key(key) {
                c.ttls.insert(key.to_owned(), seconds);
            }
        })
    }

    fn lpush(&mut self, list: &str, value: &str) -> Result<(), DeliveryError> {
        self.apply(|c| {
            c.lists
                .entry(list.to_owned())
                .or_default()
                .push_front(value.to_owned());
        })
    }
}
