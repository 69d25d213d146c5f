use std::fmt;

/// Catalog lookup and validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    UnknownJobId(String),
    UnknownSectorId(String),
    DuplicateJobId(String),
    DuplicateSectorId(String),
    DanglingSector {
        job_id: String,
        sector_id: String,
    },
    InvalidSalary {
        job_id: String,
        min: u64,
        max: u64,
    },
    MissingSkills(String),
    Parse(String),
}

impl CatalogError {
    /// True for lookup misses, which callers render as a not-found state.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CatalogError::UnknownJobId(_) | CatalogError::UnknownSectorId(_)
        )
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::UnknownJobId(id) => write!(f, "unknown job id {}", id),
            CatalogError::UnknownSectorId(id) => write!(f, "unknown sector id {}", id),
            CatalogError::DuplicateJobId(id) => write!(f, "duplicate job id {}", id),
            CatalogError::DuplicateSectorId(id) => write!(f, "duplicate sector id {}", id),
            CatalogError::DanglingSector { job_id, sector_id } => write!(
                f,
                "job {} references missing sector {}",
                job_id, sector_id
            ),
            CatalogError::InvalidSalary { job_id, min, max } => write!(
                f,
                "job {} has salary min {} above max {}",
                job_id, min, max
            ),
            CatalogError::MissingSkills(id) => write!(f, "job {} lists no skills", id),
            CatalogError::Parse(msg) => write!(f, "catalog parse error: {}", msg),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Rejection of a fourth distinct entry in the compare list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareFull {
    pub job_id: String,
    pub capacity: usize,
}

impl fmt::Display for CompareFull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "compare list is full ({} entries), cannot add {}",
            self.capacity, self.job_id
        )
    }
}

impl std::error::Error for CompareFull {}

/// Persistence adapter failures. Never fatal to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    LockPoisoned(&'static str),
    Serde(String),
    Io(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::LockPoisoned(operation) => {
                write!(f, "storage lock poisoned during {}", operation)
            }
            StorageError::Serde(msg) => write!(f, "storage serialization error: {}", msg),
            StorageError::Io(msg) => write!(f, "storage io error: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}
