//! Pipeline - pure filter/sort functions over catalog slices.
//!
//! Nothing here holds state. Identical input gives identical output, an
//! empty result is a valid answer, and no function can fail.

mod comparison;
mod filter;
mod sort;

pub use comparison::{compare_jobs, JobComparison, SKILL_PREVIEW_LEN};
pub use filter::{filter_jobs, FilterCriteria, SalaryRange};
pub use sort::{sort_jobs, sort_sectors, SortOption};
