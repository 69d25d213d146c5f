use serde::Serialize;

use crate::catalog::{Catalog, Difficulty, Job, Salary};

/// Skills shown per column before collapsing into a "+N more" count.
pub const SKILL_PREVIEW_LEN: usize = 4;

/// One column of the side-by-side comparison table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobComparison {
    pub job_id: String,
    pub name: String,
    pub salary: Salary,
    pub difficulty: Difficulty,
    pub difficulty_score: u8,
    pub skills_preview: Vec<String>,
    pub more_skills: usize,
    pub roadmap_steps: usize,
    pub certificate_count: usize,
}

impl JobComparison {
    pub fn from_job(job: &Job) -> Self {
        let shown = job.skills.len().min(SKILL_PREVIEW_LEN);
        JobComparison {
            job_id: job.id.clone(),
            name: job.name.clone(),
            salary: job.salary,
            difficulty: job.difficulty,
            difficulty_score: job.difficulty.score(),
            skills_preview: job.skills[..shown].to_vec(),
            more_skills: job.skills.len() - shown,
            roadmap_steps: job.roadmap.len(),
            certificate_count: job.certificates.len(),
        }
    }
}

/// Comparison columns for the compare list, in list order. Ids the catalog
/// no longer knows are skipped.
pub fn compare_jobs<S: AsRef<str>>(catalog: &Catalog, ids: &[S]) -> Vec<JobComparison> {
    catalog
        .resolve_jobs(ids)
        .into_iter()
        .map(JobComparison::from_job)
        .collect()
}
