use serde::{Deserialize, Serialize};

use crate::storage::StorageKey;

/// Fixed size of the compare list. The comparison view lays out one to three
/// columns, so this is not configurable.
pub const COMPARE_CAPACITY: usize = 3;

/// Options for a browsing session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrowsingConfig {
    /// How many recently-viewed ids are stored.
    pub recent_capacity: usize,
    /// How many recently-viewed ids the home screen shows.
    pub recent_display_limit: usize,
    /// Optional namespace for the persisted keys.
    pub key_prefix: Option<String>,
}

impl Default for BrowsingConfig {
    fn default() -> Self {
        Self {
            recent_capacity: 10,
            recent_display_limit: 3,
            key_prefix: None,
        }
    }
}

impl BrowsingConfig {
    pub fn with_recent_capacity(mut self, capacity: usize) -> Self {
        self.recent_capacity = capacity;
        self
    }

    pub fn with_recent_display_limit(mut self, limit: usize) -> Self {
        self.recent_display_limit = limit;
        self
    }

    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Stored history length, never below one entry.
    pub fn effective_recent_capacity(&self) -> usize {
        self.recent_capacity.max(1)
    }

    pub fn key(&self, key: StorageKey) -> String {
        key.qualified(self.key_prefix.as_deref())
    }
}
