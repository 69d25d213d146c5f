//! Storage - key-value persistence for browsing state.
//!
//! The engine writes each collection under a well-known key as a JSON value
//! and reads them back on startup. Stores only need `get` and `set`; they may
//! fail, and the engine treats every failure as non-fatal.
//!
//! ## Example
//!
//! ```ignore
//! use career_compass::{InMemoryStore, KeyValueStore, StorageKey};
//!
//! let store = InMemoryStore::new();
//! store.set(StorageKey::Favorites.as_str(), serde_json::json!(["nurse"]))?;
//! let favorites = store.get(StorageKey::Favorites.as_str())?;
//! ```

mod in_memory;
mod json_file;

use serde_json::Value;

pub use crate::error::StorageError;
pub use in_memory::InMemoryStore;
pub use json_file::JsonFileStore;

/// Durable string-keyed store of JSON values.
pub trait KeyValueStore: Send + Sync {
    /// Get the value stored under `key`. Returns None if absent.
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: Value) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// The four keys the browsing state is persisted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Favorites,
    CompareList,
    RecentlyViewed,
    ViewCounts,
}

impl StorageKey {
    pub const ALL: [StorageKey; 4] = [
        StorageKey::Favorites,
        StorageKey::CompareList,
        StorageKey::RecentlyViewed,
        StorageKey::ViewCounts,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StorageKey::Favorites => "favorites",
            StorageKey::CompareList => "compareList",
            StorageKey::RecentlyViewed => "recentlyViewed",
            StorageKey::ViewCounts => "viewCounts",
        }
    }

    /// Key with an optional `"<prefix>:"` namespace.
    pub fn qualified(self, prefix: Option<&str>) -> String {
        match prefix {
            Some(prefix) => format!("{}:{}", prefix, self.as_str()),
            None => self.as_str().to_string(),
        }
    }
}
