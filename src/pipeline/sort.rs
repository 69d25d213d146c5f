use std::cmp::Reverse;

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::browsing::ViewCounts;
use crate::catalog::{Job, Sector};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    #[default]
    AlphabeticalAsc,
    AlphabeticalDesc,
    MostViewed,
}

impl SortOption {
    pub const ALL: [SortOption; 3] = [
        SortOption::AlphabeticalAsc,
        SortOption::AlphabeticalDesc,
        SortOption::MostViewed,
    ];
}

// Primary key folds case and strips accents (NFD minus combining marks), so
// "Électricien" sorts with the e's. The case-folded name breaks primary ties.
// Equal keys keep input order since every sort here is stable.
fn name_key(name: &str) -> (String, String) {
    let folded = name.to_lowercase();
    let base = folded.nfd().filter(|c| !is_combining_mark(*c)).collect();
    (base, folded)
}

/// Order jobs by `option`. All orders are stable.
///
/// `MostViewed` ranks by descending view count, unseen jobs counting as 0.
pub fn sort_jobs<'a, I>(jobs: I, option: SortOption, counts: &ViewCounts) -> Vec<&'a Job>
where
    I: IntoIterator<Item = &'a Job>,
{
    let mut sorted: Vec<&'a Job> = jobs.into_iter().collect();
    match option {
        SortOption::AlphabeticalAsc => sorted.sort_by_cached_key(|job| name_key(&job.name)),
        SortOption::AlphabeticalDesc => {
            sorted.sort_by_cached_key(|job| Reverse(name_key(&job.name)))
        }
        SortOption::MostViewed => sorted.sort_by_key(|job| Reverse(counts.get(&job.id))),
    }
    sorted
}

/// Order sectors by `option`.
///
/// Sectors carry no view counter, so `MostViewed` keeps input order.
pub fn sort_sectors<'a, I>(sectors: I, option: SortOption) -> Vec<&'a Sector>
where
    I: IntoIterator<Item = &'a Sector>,
{
    let mut sorted: Vec<&'a Sector> = sectors.into_iter().collect();
    match option {
        SortOption::AlphabeticalAsc => sorted.sort_by_cached_key(|s| name_key(&s.name)),
        SortOption::AlphabeticalDesc => sorted.sort_by_cached_key(|s| Reverse(name_key(&s.name))),
        SortOption::MostViewed => {}
    }
    sorted
}
