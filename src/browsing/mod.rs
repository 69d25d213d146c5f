//! Browsing - favorites, the compare list, viewing history and view counts.
//!
//! One [`BrowsingState`] per session holds all four collections behind a
//! single lock and writes each change through to a [`KeyValueStore`].
//!
//! ## Example
//!
//! ```ignore
//! use career_compass::{BrowsingState, InMemoryStore};
//!
//! let state = BrowsingState::new(InMemoryStore::new());
//! state.toggle_favorite("web-developer");
//! state.record_view("data-analyst");
//!
//! if let Err(full) = state.toggle_compare("nurse") {
//!     println!("{}", full);
//! }
//! ```
//!
//! [`KeyValueStore`]: crate::storage::KeyValueStore

mod collections;
mod config;
mod state;

pub use collections::{CompareList, Favorites, RecentlyViewed, ViewCounts};
pub use config::{BrowsingConfig, COMPARE_CAPACITY};
pub use state::{BrowsingState, ChangeEvent};
