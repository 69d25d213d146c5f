//! Integration tests for the browsing state engine.


use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use career_compass::{
    compare_jobs, BrowsingConfig, BrowsingState, InMemoryStore, JsonFileStore,
    KeyValueStore, SortOption, COMPARE_CAPACITY,
};
use serde_json::json;
use support::{catalog, FlakyStore, PanicOnceStore, UnreadableStore};

#[test]
fn compare_list_never_exceeds_capacity() {
    let state = BrowsingState::new(InMemoryStore::new());

    for id in ["web-developer", "nurse", "data-scientist"] {
        assert_eq!(state.toggle_compare(id), Ok(true));
        assert!(state.compare_list().len() <= COMPARE_CAPACITY);
    }

    let err = state.toggle_compare("graphic-designer").unwrap_err();
    assert_eq!(err.job_id, "graphic-designer");
    assert_eq!(
        state.compare_list(),
        vec!["web-developer", "nurse", "data-scientist"]
    );
    assert!(!state.is_in_compare("graphic-designer"));
}

#[test]
fn full_compare_list_still_accepts_removal() {
    let state = BrowsingState::new(InMemoryStore::new());
    for id in ["a", "b", "c"] {
        state.toggle_compare(id).unwrap();
    }

    assert_eq!(state.toggle_compare("b"), Ok(false));
    assert_eq!(state.toggle_compare("d"), Ok(true));
    assert_eq!(state.compare_list(), vec!["a", "c", "d"]);
}

#[test]
fn rejected_compare_does_not_write() {
    let store = FlakyStore::new(usize::MAX);
    let state = BrowsingState::new(store.clone());
    for id in ["a", "b", "c"] {
        state.toggle_compare(id).unwrap();
    }
    let writes = store.attempts();

    assert!(state.toggle_compare("d").is_err());
    assert_eq!(store.attempts(), writes);
}

#[test]
fn clear_compare_list_empties_and_persists() {
    let store = InMemoryStore::new();
    let state = BrowsingState::new(store.clone());
    state.toggle_compare("nurse").unwrap();
    state.toggle_compare("web-developer").unwrap();

    state.clear_compare_list();
    assert!(state.compare_list().is_empty());
    assert_eq!(store.get("compareList").unwrap(), Some(json!([])));
}

#[test]
fn concurrent_compare_toggles_respect_capacity() {
    let state = BrowsingState::new(InMemoryStore::new());
    let accepted = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let state = state.clone();
            let accepted = Arc::clone(&accepted);
            thread::spawn(move || {
                if state.toggle_compare(&format!("job-{}", i)).is_ok() {
                    accepted.fetch_add(1, Ordering::SeqCst);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(accepted.load(Ordering::SeqCst), COMPARE_CAPACITY);
    assert_eq!(state.compare_list().len(), COMPARE_CAPACITY);
}

#[test]
fn favorite_toggled_twice_restores_membership() {
    let store = FlakyStore::new(usize::MAX);
    let state = BrowsingState::new(store.clone());
    state.toggle_favorite("nurse");

    assert!(state.toggle_favorite("web-developer"));
    assert!(!state.toggle_favorite("web-developer"));

    assert!(!state.is_favorite("web-developer"));
    assert!(state.is_favorite("nurse"));
    assert_eq!(store.attempts(), 3);
}

#[test]
fn favorite_is_visible_from_every_handle() {
    let state = BrowsingState::new(InMemoryStore::new());
    let detail_screen = state.clone();
    let card = state.clone();

    detail_screen.toggle_favorite("data-scientist");
    assert!(card.is_favorite("data-scientist"));
    assert_eq!(state.favorites(), vec!["data-scientist"]);
}

#[test]
fn recently_viewed_dedups_most_recent_first() {
    let state = BrowsingState::new(InMemoryStore::new());
    for id in ["a", "b", "a", "c"] {
        state.add_recently_viewed(id);
    }
    assert_eq!(state.recently_viewed(), vec!["c", "a", "b"]);
}

#[test]
fn recently_viewed_is_capped() {
    let state = BrowsingState::open(
        InMemoryStore::new(),
        BrowsingConfig::default().with_recent_capacity(4),
    );
    for i in 0..10 {
        state.add_recently_viewed(&format!("job-{}", i));
    }
    assert_eq!(
        state.recently_viewed(),
        vec!["job-9", "job-8", "job-7", "job-6"]
    );
    assert_eq!(state.recently_viewed_display(), vec!["job-9", "job-8", "job-7"]);
}

#[test]
fn recently_viewed_returns_a_copy() {
    let state = BrowsingState::new(InMemoryStore::new());
    state.add_recently_viewed("nurse");

    let mut copy = state.recently_viewed();
    copy.clear();
    assert_eq!(state.recently_viewed(), vec!["nurse"]);
}

#[test]
fn view_counts_grow_once_per_view() {
    let state = BrowsingState::new(InMemoryStore::new());
    let mut previous = 0;
    for _ in 0..7 {
        let count = state.increment_view_count("nurse");
        assert!(count > previous);
        previous = count;
    }
    assert_eq!(state.view_count("nurse"), 7);
    assert_eq!(state.view_count("web-developer"), 0);
}

#[test]
fn record_view_updates_history_and_count() {
    let state = BrowsingState::new(InMemoryStore::new());
    state.record_view("nurse");
    state.record_view("web-developer");
    state.record_view("nurse");

    assert_eq!(state.recently_viewed(), vec!["nurse", "web-developer"]);
    assert_eq!(state.view_count("nurse"), 2);
    assert_eq!(state.view_count("web-developer"), 1);
}

#[test]
fn state_round_trips_through_store() {
    let store = InMemoryStore::new();
    {
        let state = BrowsingState::new(store.clone());
        state.toggle_favorite("nurse");
        state.toggle_favorite("graphic-designer");
        state.toggle_compare("data-scientist").unwrap();
        state.toggle_compare("web-developer").unwrap();
        state.record_view("it-support");
        state.record_view("nurse");
        state.record_view("nurse");
    }

    let reopened = BrowsingState::new(store);
    assert_eq!(reopened.favorites(), vec!["graphic-designer", "nurse"]);
    assert!(reopened.is_favorite("nurse"));
    assert_eq!(reopened.compare_list(), vec!["data-scientist", "web-developer"]);
    assert_eq!(reopened.recently_viewed(), vec!["nurse", "it-support"]);
    assert_eq!(reopened.view_count("nurse"), 2);
    assert_eq!(reopened.view_count("it-support"), 1);
}

#[test]
fn state_survives_file_store_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("browsing.json");
    {
        let state = BrowsingState::new(JsonFileStore::open(&path).unwrap());
        state.toggle_favorite("nurse");
        state.toggle_compare("nurse").unwrap();
        state.record_view("nurse");
    }

    let reopened = BrowsingState::new(JsonFileStore::open(&path).unwrap());
    assert!(reopened.is_favorite("nurse"));
    assert!(reopened.is_in_compare("nurse"));
    assert_eq!(reopened.recently_viewed(), vec!["nurse"]);
    assert_eq!(reopened.view_count("nurse"), 1);
}

#[test]
fn write_failure_degrades_to_memory_only() {
    let store = FlakyStore::new(1);
    let state = BrowsingState::new(store.clone());

    state.toggle_favorite("nurse");
    assert!(state.is_persistent());

    state.toggle_favorite("web-developer");
    assert!(!state.is_persistent());
    assert!(state.is_favorite("web-developer"));

    // No further writes are attempted once degraded.
    state.toggle_compare("nurse").unwrap();
    assert_eq!(store.attempts(), 2);
    assert!(state.is_in_compare("nurse"));

    let reopened = BrowsingState::new(store.inner().clone());
    assert_eq!(reopened.favorites(), vec!["nurse"]);
    assert!(reopened.compare_list().is_empty());
}

#[test]
fn unreadable_store_is_never_overwritten() {
    let writes = Arc::new(AtomicUsize::new(0));
    let state = BrowsingState::new(UnreadableStore {
        writes: Arc::clone(&writes),
    });

    assert!(!state.is_persistent());
    state.toggle_favorite("nurse");
    state.record_view("nurse");

    assert!(state.is_favorite("nurse"));
    assert_eq!(writes.load(Ordering::SeqCst), 0);
}

#[test]
fn panic_inside_a_write_leaves_state_usable() {
    let store = PanicOnceStore::new();
    let state = BrowsingState::new(store.clone());

    let writer = state.clone();
    let outcome = thread::spawn(move || writer.toggle_favorite("a")).join();
    assert!(outcome.is_err());

    // The in-memory toggle landed before the write panicked; nothing was stored.
    assert!(state.is_favorite("a"));
    assert!(store.get("favorites").unwrap().is_none());

    assert_eq!(state.toggle_compare("b"), Ok(true));
    assert!(state.is_in_compare("b"));
    assert!(state.is_persistent());
    assert_eq!(store.get("compareList").unwrap(), Some(json!(["b"])));
}

#[test]
fn prune_unknown_drops_retired_jobs() {
    let store = InMemoryStore::new();
    store.set("favorites", json!(["nurse", "astronaut"])).unwrap();
    store.set("compareList", json!(["astronaut", "web-developer"])).unwrap();
    store.set("recentlyViewed", json!(["nurse"])).unwrap();
    store.set("viewCounts", json!({"astronaut": 4, "nurse": 1})).unwrap();

    let state = BrowsingState::new(store.clone());
    state.prune_unknown(&catalog());

    assert_eq!(state.favorites(), vec!["nurse"]);
    assert_eq!(state.compare_list(), vec!["web-developer"]);
    assert_eq!(state.recently_viewed(), vec!["nurse"]);
    assert_eq!(state.view_count("astronaut"), 0);
    assert_eq!(store.get("viewCounts").unwrap(), Some(json!({"nurse": 1})));
}

#[test]
fn most_viewed_uses_session_counts() {
    let catalog = catalog();
    let state = BrowsingState::new(InMemoryStore::new());
    state.record_view("nurse");
    state.record_view("nurse");
    state.record_view("graphic-designer");

    let sorted: Vec<_> = state
        .sort_jobs(catalog.jobs(), SortOption::MostViewed)
        .iter()
        .map(|j| j.id.as_str())
        .collect();
    assert_eq!(
        sorted,
        vec![
            "nurse",
            "graphic-designer",
            "web-developer",
            "data-scientist",
            "it-support"
        ]
    );
}

#[test]
fn compare_view_follows_compare_list() {
    let catalog = catalog();
    let state = BrowsingState::new(InMemoryStore::new());
    state.toggle_compare("nurse").unwrap();
    state.toggle_compare("data-scientist").unwrap();

    let columns = compare_jobs(&catalog, &state.compare_list());
    assert_eq!(columns.len(), 2);
    assert_eq!(columns[0].name, "Nurse");
    assert_eq!(columns[1].difficulty_score, 3);
    assert_eq!(columns[1].roadmap_steps, 4);
    assert_eq!(columns[1].certificate_count, 2);
}

#[cfg(feature = "emitter")]
#[test]
fn change_listeners_receive_job_ids() {
    use std::sync::Mutex;
    use std::time::Duration;

    let state = BrowsingState::new(InMemoryStore::new());
    let seen = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&seen);
    state.on_change(career_compass::ChangeEvent::FavoritesChanged, move |job_id| {
        sink.lock().unwrap().push(job_id);
    });

    state.toggle_favorite("nurse");
    state.toggle_compare("nurse").unwrap();

    // Listeners run on emitter threads, give them time
    thread::sleep(Duration::from_millis(50));
    assert_eq!(*seen.lock().unwrap(), vec!["nurse".to_string()]);
}
