//! The four browsing collections and the invariants each one keeps.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::config::COMPARE_CAPACITY;
use crate::error::CompareFull;

/// Favorited job ids. Membership only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites(BTreeSet<String>);

impl Favorites {
    pub fn contains(&self, job_id: &str) -> bool {
        self.0.contains(job_id)
    }

    /// Flip membership. Returns whether the job is now a favorite.
    pub fn toggle(&mut self, job_id: &str) -> bool {
        if self.0.remove(job_id) {
            false
        } else {
            self.0.insert(job_id.to_string());
            true
        }
    }

    pub fn ids(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) -> bool {
        let before = self.0.len();
        self.0.retain(|id| keep(id));
        self.0.len() != before
    }
}

/// Jobs picked for side-by-side comparison, oldest first, at most
/// [`COMPARE_CAPACITY`] and never duplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CompareList(Vec<String>);

impl CompareList {
    /// Build from stored ids: duplicates dropped, then cut to capacity.
    pub fn from_ids(ids: Vec<String>) -> Self {
        let mut list = Vec::with_capacity(COMPARE_CAPACITY);
        for id in ids {
            if list.len() == COMPARE_CAPACITY {
                break;
            }
            if !list.contains(&id) {
                list.push(id);
            }
        }
        CompareList(list)
    }

    pub fn contains(&self, job_id: &str) -> bool {
        self.0.iter().any(|id| id == job_id)
    }

    /// Remove if present, otherwise append when there is room.
    ///
    /// Returns whether the job is now in the list. A full list rejects the
    /// insert and is left untouched.
    pub fn toggle(&mut self, job_id: &str) -> Result<bool, CompareFull> {
        if let Some(pos) = self.0.iter().position(|id| id == job_id) {
            self.0.remove(pos);
            return Ok(false);
        }
        if self.0.len() >= COMPARE_CAPACITY {
            return Err(CompareFull {
                job_id: job_id.to_string(),
                capacity: COMPARE_CAPACITY,
            });
        }
        self.0.push(job_id.to_string());
        Ok(true)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn ids(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.0.len() >= COMPARE_CAPACITY
    }

    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) -> bool {
        let before = self.0.len();
        self.0.retain(|id| keep(id));
        self.0.len() != before
    }
}

/// Viewing history, most recent first, each id once, bounded by `capacity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentlyViewed {
    ids: Vec<String>,
    capacity: usize,
}

impl RecentlyViewed {
    pub fn new(capacity: usize) -> Self {
        RecentlyViewed {
            ids: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Build from stored ids (most recent first): later duplicates dropped,
    /// then cut to capacity.
    pub fn from_ids(ids: Vec<String>, capacity: usize) -> Self {
        let mut recent = RecentlyViewed::new(capacity);
        for id in ids {
            if recent.ids.len() == recent.capacity {
                break;
            }
            if !recent.ids.contains(&id) {
                recent.ids.push(id);
            }
        }
        recent
    }

    /// Move `job_id` to the front, inserting it if new.
    pub fn push(&mut self, job_id: &str) {
        if let Some(pos) = self.ids.iter().position(|id| id == job_id) {
            self.ids.remove(pos);
        }
        self.ids.insert(0, job_id.to_string());
        self.ids.truncate(self.capacity);
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) -> bool {
        let before = self.ids.len();
        self.ids.retain(|id| keep(id));
        self.ids.len() != before
    }
}

/// Per-job view counters. Absent ids count as zero; counts only grow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewCounts(BTreeMap<String, u64>);

impl ViewCounts {
    pub fn get(&self, job_id: &str) -> u64 {
        self.0.get(job_id).copied().unwrap_or(0)
    }

    /// Add one view. Returns the new count.
    pub fn increment(&mut self, job_id: &str) -> u64 {
        let count = self.0.entry(job_id.to_string()).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(id, count)| (id.as_str(), *count))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) -> bool {
        let before = self.0.len();
        self.0.retain(|id, _| keep(id));
        self.0.len() != before
    }
}
