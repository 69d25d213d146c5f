use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{Difficulty, Job};

/// Inclusive salary band. Construction normalises an inverted band by
/// swapping its ends, so `min <= max` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(u64, u64)", into = "(u64, u64)")]
pub struct SalaryRange {
    min: u64,
    max: u64,
}

impl SalaryRange {
    pub const DEFAULT_MAX: u64 = 500_000;

    pub fn new(min: u64, max: u64) -> Self {
        if min <= max {
            SalaryRange { min, max }
        } else {
            SalaryRange { min: max, max: min }
        }
    }

    /// A band every job overlaps.
    pub fn any() -> Self {
        SalaryRange {
            min: 0,
            max: u64::MAX,
        }
    }

    pub fn min(&self) -> u64 {
        self.min
    }

    pub fn max(&self) -> u64 {
        self.max
    }

    /// Interval overlap, not containment.
    pub fn overlaps(&self, min: u64, max: u64) -> bool {
        min <= self.max && max >= self.min
    }
}

impl Default for SalaryRange {
    fn default() -> Self {
        SalaryRange::new(0, Self::DEFAULT_MAX)
    }
}

impl From<(u64, u64)> for SalaryRange {
    fn from((min, max): (u64, u64)) -> Self {
        SalaryRange::new(min, max)
    }
}

impl From<SalaryRange> for (u64, u64) {
    fn from(range: SalaryRange) -> Self {
        (range.min, range.max)
    }
}

/// What the filter sheet submits. Empty sets mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    pub skills: BTreeSet<String>,
    pub salary_range: SalaryRange,
    pub difficulty: BTreeSet<Difficulty>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.skills.insert(skill.into());
        self
    }

    pub fn with_salary_range(mut self, min: u64, max: u64) -> Self {
        self.salary_range = SalaryRange::new(min, max);
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty.insert(difficulty);
        self
    }

    /// Whether `job` passes every constraint.
    pub fn matches(&self, job: &Job) -> bool {
        self.matches_difficulty(job) && self.matches_skills(job) && self.matches_salary(job)
    }

    fn matches_difficulty(&self, job: &Job) -> bool {
        self.difficulty.is_empty() || self.difficulty.contains(&job.difficulty)
    }

    // ANY overlap, case-insensitive, surrounding whitespace ignored.
    fn matches_skills(&self, job: &Job) -> bool {
        let wanted: BTreeSet<String> = self
            .skills
            .iter()
            .map(|s| normalize_skill(s))
            .filter(|s| !s.is_empty())
            .collect();
        if wanted.is_empty() {
            return true;
        }
        job.skills
            .iter()
            .any(|skill| wanted.contains(&normalize_skill(skill)))
    }

    fn matches_salary(&self, job: &Job) -> bool {
        self.salary_range.overlaps(job.salary.min, job.salary.max)
    }
}

fn normalize_skill(skill: &str) -> String {
    skill.trim().to_lowercase()
}

/// Jobs that pass `criteria`, in input order.
pub fn filter_jobs<'a, I>(jobs: I, criteria: &FilterCriteria) -> Vec<&'a Job>
where
    I: IntoIterator<Item = &'a Job>,
{
    jobs.into_iter().filter(|job| criteria.matches(job)).collect()
}
