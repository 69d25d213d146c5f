//! InMemoryStore - HashMap-backed store for tests and sessions without disk.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde_json::Value;

use super::{KeyValueStore, StorageError};

/// In-memory key-value store backed by a HashMap.
///
/// Clone-friendly via Arc: clones share the same storage, which is how a test
/// simulates reopening the engine against the same durable store.
#[derive(Clone)]
pub struct InMemoryStore {
    storage: Arc<RwLock<HashMap<String, Value>>>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.storage.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StorageError::LockPoisoned("read"))?;
        Ok(storage.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StorageError::LockPoisoned("write"))?;
        storage.insert(key.to_string(), value);
        Ok(())
    }
}
