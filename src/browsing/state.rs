use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[cfg(feature = "emitter")]
use event_emitter_rs::EventEmitter;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::collections::{CompareList, Favorites, RecentlyViewed, ViewCounts};
use super::config::BrowsingConfig;
use crate::catalog::{Catalog, Job};
use crate::error::{CompareFull, StorageError};
use crate::pipeline::{self, SortOption};
use crate::storage::{KeyValueStore, StorageKey};

/// Notification fired after a collection changes and has been written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeEvent {
    FavoritesChanged,
    CompareChanged,
    RecentlyViewedChanged,
    ViewCountsChanged,
}

impl ChangeEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeEvent::FavoritesChanged => "FavoritesChanged",
            ChangeEvent::CompareChanged => "CompareChanged",
            ChangeEvent::RecentlyViewedChanged => "RecentlyViewedChanged",
            ChangeEvent::ViewCountsChanged => "ViewCountsChanged",
        }
    }
}

struct Collections {
    favorites: Favorites,
    compare: CompareList,
    recent: RecentlyViewed,
    counts: ViewCounts,
}

struct Shared<S> {
    store: S,
    config: BrowsingConfig,
    collections: Mutex<Collections>,
    degraded: AtomicBool,
    #[cfg(feature = "emitter")]
    emitter: Mutex<EventEmitter>,
}

/// The browsing state engine.
///
/// Owns favorites, the bounded compare list, recently-viewed history and view
/// counts. Every mutation happens under one lock and is written through to the
/// store before the lock is released, so persisted values are ordered after
/// the in-memory change that produced them.
///
/// Cloning yields another handle to the same state; hand one to every screen.
///
/// Store failures are logged and switch the session to memory-only. They are
/// never returned to the caller.
pub struct BrowsingState<S> {
    shared: Arc<Shared<S>>,
}

impl<S> Clone for BrowsingState<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<S: KeyValueStore> BrowsingState<S> {
    /// Open with default options.
    pub fn new(store: S) -> Self {
        Self::open(store, BrowsingConfig::default())
    }

    /// Hydrate all four collections from `store`.
    ///
    /// Missing keys start empty. Malformed values are logged and start empty.
    /// If the store cannot be read at all the session runs memory-only, so an
    /// unreadable store is never overwritten with empty collections.
    pub fn open(store: S, config: BrowsingConfig) -> Self {
        let mut degraded = false;

        let favorites: Favorites =
            load(&store, &config, StorageKey::Favorites, &mut degraded).unwrap_or_default();
        let compare = CompareList::from_ids(
            load(&store, &config, StorageKey::CompareList, &mut degraded).unwrap_or_default(),
        );
        let recent = RecentlyViewed::from_ids(
            load(&store, &config, StorageKey::RecentlyViewed, &mut degraded).unwrap_or_default(),
            config.effective_recent_capacity(),
        );
        let counts: ViewCounts =
            load(&store, &config, StorageKey::ViewCounts, &mut degraded).unwrap_or_default();

        tracing::debug!(
            favorites = favorites.len(),
            compare = compare.len(),
            recent = recent.len(),
            counted = counts.len(),
            degraded,
            "browsing state hydrated"
        );

        BrowsingState {
            shared: Arc::new(Shared {
                store,
                config,
                collections: Mutex::new(Collections {
                    favorites,
                    compare,
                    recent,
                    counts,
                }),
                degraded: AtomicBool::new(degraded),
                #[cfg(feature = "emitter")]
                emitter: Mutex::new(EventEmitter::new()),
            }),
        }
    }

    pub fn config(&self) -> &BrowsingConfig {
        &self.shared.config
    }

    pub fn store(&self) -> &S {
        &self.shared.store
    }

    /// False once a store failure has switched the session to memory-only.
    pub fn is_persistent(&self) -> bool {
        !self.shared.degraded.load(Ordering::SeqCst)
    }

    // ------------------------------------------------------------------
    // Favorites
    // ------------------------------------------------------------------

    pub fn is_favorite(&self, job_id: &str) -> bool {
        self.collections().favorites.contains(job_id)
    }

    /// Flip favorite membership. Returns whether the job is now a favorite.
    pub fn toggle_favorite(&self, job_id: &str) -> bool {
        let now_favorite = {
            let mut collections = self.collections();
            let now_favorite = collections.favorites.toggle(job_id);
            self.write_through(StorageKey::Favorites, &collections.favorites);
            now_favorite
        };
        tracing::debug!(job_id, now_favorite, "favorite toggled");
        self.notify(ChangeEvent::FavoritesChanged, job_id);
        now_favorite
    }

    /// Favorite ids in ascending order.
    pub fn favorites(&self) -> Vec<String> {
        self.collections().favorites.ids()
    }

    // ------------------------------------------------------------------
    // Compare list
    // ------------------------------------------------------------------

    pub fn is_in_compare(&self, job_id: &str) -> bool {
        self.collections().compare.contains(job_id)
    }

    /// Remove `job_id` from the compare list, or add it if there is room.
    ///
    /// Returns whether the job is now in the list. Adding a fourth distinct
    /// job fails with [`CompareFull`] and changes nothing. The capacity check
    /// and the insert happen under the same lock.
    pub fn toggle_compare(&self, job_id: &str) -> Result<bool, CompareFull> {
        let added = {
            let mut collections = self.collections();
            let added = collections.compare.toggle(job_id)?;
            self.write_through(StorageKey::CompareList, &collections.compare);
            added
        };
        tracing::debug!(job_id, added, "compare toggled");
        self.notify(ChangeEvent::CompareChanged, job_id);
        Ok(added)
    }

    pub fn clear_compare_list(&self) {
        {
            let mut collections = self.collections();
            collections.compare.clear();
            self.write_through(StorageKey::CompareList, &collections.compare);
        }
        tracing::debug!("compare list cleared");
        self.notify(ChangeEvent::CompareChanged, "");
    }

    /// Copy of the compare list, oldest pick first.
    pub fn compare_list(&self) -> Vec<String> {
        self.collections().compare.ids().to_vec()
    }

    // ------------------------------------------------------------------
    // Recently viewed and view counts
    // ------------------------------------------------------------------

    /// Move `job_id` to the front of the history.
    pub fn add_recently_viewed(&self, job_id: &str) {
        {
            let mut collections = self.collections();
            collections.recent.push(job_id);
            self.write_through(StorageKey::RecentlyViewed, collections.recent.ids());
        }
        tracing::debug!(job_id, "recently viewed updated");
        self.notify(ChangeEvent::RecentlyViewedChanged, job_id);
    }

    /// Copy of the stored history, most recent first.
    pub fn recently_viewed(&self) -> Vec<String> {
        self.collections().recent.ids().to_vec()
    }

    /// The head of the history the home screen shows.
    pub fn recently_viewed_display(&self) -> Vec<String> {
        let limit = self.shared.config.recent_display_limit;
        self.collections()
            .recent
            .ids()
            .iter()
            .take(limit)
            .cloned()
            .collect()
    }

    /// Count one view of `job_id`. Returns the new count.
    pub fn increment_view_count(&self, job_id: &str) -> u64 {
        let count = {
            let mut collections = self.collections();
            let count = collections.counts.increment(job_id);
            self.write_through(StorageKey::ViewCounts, &collections.counts);
            count
        };
        tracing::debug!(job_id, count, "view counted");
        self.notify(ChangeEvent::ViewCountsChanged, job_id);
        count
    }

    pub fn view_count(&self, job_id: &str) -> u64 {
        self.collections().counts.get(job_id)
    }

    pub fn view_counts(&self) -> ViewCounts {
        self.collections().counts.clone()
    }

    /// What opening a job's detail screen does: push it onto the history and
    /// count the view.
    pub fn record_view(&self, job_id: &str) {
        self.add_recently_viewed(job_id);
        self.increment_view_count(job_id);
    }

    // ------------------------------------------------------------------
    // Catalog-aware helpers
    // ------------------------------------------------------------------

    /// Sort with this session's view counts.
    pub fn sort_jobs<'a, I>(&self, jobs: I, option: SortOption) -> Vec<&'a Job>
    where
        I: IntoIterator<Item = &'a Job>,
    {
        let counts = self.view_counts();
        pipeline::sort_jobs(jobs, option, &counts)
    }

    /// Drop ids the catalog no longer knows from every collection, writing
    /// through the ones that changed.
    pub fn prune_unknown(&self, catalog: &Catalog) {
        let mut changed = Vec::new();
        {
            let mut collections = self.collections();
            let known = |id: &str| catalog.contains_job(id);

            if collections.favorites.retain(known) {
                self.write_through(StorageKey::Favorites, &collections.favorites);
                changed.push(ChangeEvent::FavoritesChanged);
            }
            if collections.compare.retain(known) {
                self.write_through(StorageKey::CompareList, &collections.compare);
                changed.push(ChangeEvent::CompareChanged);
            }
            if collections.recent.retain(known) {
                self.write_through(StorageKey::RecentlyViewed, collections.recent.ids());
                changed.push(ChangeEvent::RecentlyViewedChanged);
            }
            if collections.counts.retain(known) {
                self.write_through(StorageKey::ViewCounts, &collections.counts);
                changed.push(ChangeEvent::ViewCountsChanged);
            }
        }
        for event in changed {
            tracing::debug!(event = event.as_str(), "pruned unknown job ids");
            self.notify(event, "");
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    // Every mutation completes before a panic could poison the lock, so the
    // inner state is still consistent and safe to keep using.
    fn collections(&self) -> MutexGuard<'_, Collections> {
        self.shared
            .collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_through<T: Serialize + ?Sized>(&self, key: StorageKey, value: &T) {
        if self.shared.degraded.load(Ordering::SeqCst) {
            return;
        }

        let key = self.shared.config.key(key);
        let result = serde_json::to_value(value)
            .map_err(|e| StorageError::Serde(e.to_string()))
            .and_then(|value| self.shared.store.set(&key, value));

        if let Err(error) = result {
            tracing::warn!(
                key = key.as_str(),
                %error,
                "write-through failed, continuing without persistence"
            );
            self.shared.degraded.store(true, Ordering::SeqCst);
        }
    }

    #[cfg(feature = "emitter")]
    fn notify(&self, event: ChangeEvent, job_id: &str) {
        let mut emitter = self
            .shared
            .emitter
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        emitter.emit(event.as_str(), job_id.to_string());
    }

    #[cfg(not(feature = "emitter"))]
    fn notify(&self, _event: ChangeEvent, _job_id: &str) {}
}

#[cfg(feature = "emitter")]
impl<S> BrowsingState<S> {
    /// Register a listener for `event`. The listener receives the affected
    /// job id (empty when the change is not about one job) and runs
    /// asynchronously.
    pub fn on_change<F>(&self, event: ChangeEvent, listener: F)
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        let mut emitter = self
            .shared
            .emitter
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        emitter.on(event.as_str(), listener);
    }
}

fn load<S, T>(
    store: &S,
    config: &BrowsingConfig,
    key: StorageKey,
    degraded: &mut bool,
) -> Option<T>
where
    S: KeyValueStore,
    T: DeserializeOwned,
{
    let key = config.key(key);
    match store.get(&key) {
        Ok(Some(value)) => match serde_json::from_value(value) {
            Ok(parsed) => Some(parsed),
            Err(error) => {
                tracing::warn!(key = key.as_str(), %error, "ignoring malformed stored value");
                None
            }
        },
        Ok(None) => None,
        Err(error) => {
            tracing::warn!(
                key = key.as_str(),
                %error,
                "store unreadable, continuing without persistence"
            );
            *degraded = true;
            None
        }
    }
}
