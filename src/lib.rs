mod browsing;
mod catalog;
mod error;
mod pipeline;
mod storage;

pub use browsing::{
    BrowsingConfig, BrowsingState, ChangeEvent, CompareList, Favorites, RecentlyViewed,
    ViewCounts, COMPARE_CAPACITY,
};
pub use catalog::{
    Catalog, Certificate, CertificateKind, Difficulty, Gradient, Job, Link, LinkKind,
    RoadmapStep, Salary, Sector,
};
pub use error::{CatalogError, CompareFull, StorageError};
pub use pipeline::{
    compare_jobs, filter_jobs, sort_jobs, sort_sectors, FilterCriteria, JobComparison,
    SalaryRange, SortOption, SKILL_PREVIEW_LEN,
};
pub use storage::{InMemoryStore, JsonFileStore, KeyValueStore, StorageKey};
