//! Catalog records - sectors and the jobs grouped under them.

use serde::{Deserialize, Serialize};

/// Two-stop color gradient used to theme a sector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gradient {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sector {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub gradient: Gradient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Level on a 1..=3 scale, as drawn in the comparison bars.
    pub fn score(self) -> u8 {
        match self {
            Difficulty::Beginner => 1,
            Difficulty::Intermediate => 2,
            Difficulty::Advanced => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

/// Yearly salary band in whole currency units. Catalog documents must give
/// both ends as non-negative integers; a fractional or negative amount fails
/// the load. `min <= max` is checked when the catalog is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Salary {
    pub min: u64,
    pub max: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapStep {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CertificateKind {
    Required,
    Optional,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CertificateKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Free,
    Paid,
}

/// A learning resource for a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub name: String,
    pub url: String,
    pub platform: String,
    #[serde(rename = "type")]
    pub kind: LinkKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub sector_id: String,
    pub name: String,
    pub description: String,
    pub detailed_description: String,
    pub icon: String,
    pub difficulty: Difficulty,
    pub salary: Salary,
    pub skills: Vec<String>,
    /// Sequential steps, in order.
    #[serde(default)]
    pub roadmap: Vec<RoadmapStep>,
    #[serde(default)]
    pub certificates: Vec<Certificate>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl Job {
    pub fn required_certificates(&self) -> impl Iterator<Item = &Certificate> {
        self.certificates
            .iter()
            .filter(|c| c.kind == CertificateKind::Required)
    }

    pub fn optional_certificates(&self) -> impl Iterator<Item = &Certificate> {
        self.certificates
            .iter()
            .filter(|c| c.kind == CertificateKind::Optional)
    }

    pub fn free_links(&self) -> impl Iterator<Item = &Link> {
        self.links.iter().filter(|l| l.kind == LinkKind::Free)
    }

    pub fn paid_links(&self) -> impl Iterator<Item = &Link> {
        self.links.iter().filter(|l| l.kind == LinkKind::Paid)
    }
}
