//! Catalog - the static, load-once dataset of sectors and jobs.
//!
//! The catalog is read-only after construction. Building one validates
//! referential integrity, so every consumer can assume `job.sector_id`
//! resolves.
//!
//! ## Example
//!
//! ```ignore
//! use career_compass::Catalog;
//!
//! let catalog = Catalog::from_json(include_str!("careers.json"))?;
//! let job = catalog.job("web-developer")?;
//! let sector = catalog.sector_for(job)?;
//! ```

mod catalog;
mod model;

pub use catalog::Catalog;
pub use model::{
    Certificate, CertificateKind, Difficulty, Gradient, Job, Link, LinkKind, RoadmapStep,
    Salary, Sector,
};
