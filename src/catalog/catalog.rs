use std::collections::HashMap;

use serde::Deserialize;

use super::model::{Job, Sector};
use crate::error::CatalogError;

#[derive(Deserialize)]
struct CatalogDocument {
    sectors: Vec<Sector>,
    jobs: Vec<Job>,
}

/// Immutable, validated set of sectors and jobs.
///
/// Every job's `sector_id` resolves to a sector in the same catalog; lookups
/// by id are O(1) and iteration follows load order.
#[derive(Debug, Clone)]
pub struct Catalog {
    sectors: Vec<Sector>,
    jobs: Vec<Job>,
    sector_index: HashMap<String, usize>,
    job_index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, checking ids, sector references, salary bands and skills.
    pub fn new(sectors: Vec<Sector>, jobs: Vec<Job>) -> Result<Self, CatalogError> {
        let mut sector_index = HashMap::with_capacity(sectors.len());
        for (pos, sector) in sectors.iter().enumerate() {
            if sector_index.insert(sector.id.clone(), pos).is_some() {
                return Err(CatalogError::DuplicateSectorId(sector.id.clone()));
            }
        }

        let mut job_index = HashMap::with_capacity(jobs.len());
        for (pos, job) in jobs.iter().enumerate() {
            if job_index.insert(job.id.clone(), pos).is_some() {
                return Err(CatalogError::DuplicateJobId(job.id.clone()));
            }
            if !sector_index.contains_key(&job.sector_id) {
                return Err(CatalogError::DanglingSector {
                    job_id: job.id.clone(),
                    sector_id: job.sector_id.clone(),
                });
            }
            if job.salary.min > job.salary.max {
                return Err(CatalogError::InvalidSalary {
                    job_id: job.id.clone(),
                    min: job.salary.min,
                    max: job.salary.max,
                });
            }
            if job.skills.is_empty() {
                return Err(CatalogError::MissingSkills(job.id.clone()));
            }
        }

        tracing::info!(
            sectors = sectors.len(),
            jobs = jobs.len(),
            "catalog loaded"
        );

        Ok(Catalog {
            sectors,
            jobs,
            sector_index,
            job_index,
        })
    }

    /// Parse a `{ "sectors": [...], "jobs": [...] }` document and validate it.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDocument =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::new(doc.sectors, doc.jobs)
    }

    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn job(&self, id: &str) -> Result<&Job, CatalogError> {
        self.job_index
            .get(id)
            .map(|&pos| &self.jobs[pos])
            .ok_or_else(|| CatalogError::UnknownJobId(id.to_string()))
    }

    pub fn sector(&self, id: &str) -> Result<&Sector, CatalogError> {
        self.sector_index
            .get(id)
            .map(|&pos| &self.sectors[pos])
            .ok_or_else(|| CatalogError::UnknownSectorId(id.to_string()))
    }

    pub fn contains_job(&self, id: &str) -> bool {
        self.job_index.contains_key(id)
    }

    /// The sector a job belongs to. Cannot miss for jobs from this catalog.
    pub fn sector_for(&self, job: &Job) -> Result<&Sector, CatalogError> {
        self.sector(&job.sector_id)
    }

    /// Jobs of one sector, in catalog order.
    pub fn jobs_in_sector(&self, sector_id: &str) -> Result<Vec<&Job>, CatalogError> {
        self.sector(sector_id)?;
        Ok(self
            .jobs
            .iter()
            .filter(|job| job.sector_id == sector_id)
            .collect())
    }

    /// Resolve ids to jobs in the order given, skipping ids the catalog lacks.
    pub fn resolve_jobs<S: AsRef<str>>(&self, ids: &[S]) -> Vec<&Job> {
        ids.iter()
            .filter_map(|id| self.job(id.as_ref()).ok())
            .collect()
    }
}
