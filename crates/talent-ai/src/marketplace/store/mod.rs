//! Storage collaborator boundary.
//!
//! The slug-uniqueness and capacity checks live behind this trait so they
//! execute atomically with the write that depends on them, closing the
//! read-then-write gap at the storage layer.

pub mod memory;

use super::applications::domain::{Application, ApplicationId, ApplicationNote};
use super::jobs::domain::{Job, JobId};

pub use memory::MemoryStore;

/// Error enumeration for storage failures.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("slug '{0}' is already in use")]
    SlugTaken(String),
    #[error("record not found")]
    MissingRecord,
    #[error("record already exists")]
    DuplicateRecord,
    #[error("application cap reached")]
    CapacityReached,
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Persistence operations over Job, Application and ApplicationNote records.
pub trait MarketplaceStore: Send + Sync {
    /// Inserts a job, enforcing the slug uniqueness constraint.
    fn insert_job(&self, job: Job) -> Result<Job, StorageError>;
    /// Replaces an existing job, enforcing slug uniqueness against all
    /// other jobs.
    fn update_job(&self, job: Job) -> Result<(), StorageError>;
    fn delete_job(&self, id: &JobId) -> Result<(), StorageError>;
    fn fetch_job(&self, id: &JobId) -> Result<Option<Job>, StorageError>;
    fn fetch_job_by_slug(&self, slug: &str) -> Result<Option<Job>, StorageError>;
    fn list_jobs(&self) -> Result<Vec<Job>, StorageError>;
    /// Exact slug probe used by the allocator, optionally excluding the
    /// record being re-slugged during an edit.
    fn slug_in_use(&self, slug: &str, exclude: Option<&JobId>) -> Result<bool, StorageError>;

    /// Counts existing applications for the job and inserts in one atomic
    /// step; refuses with `CapacityReached` when `cap` is met.
    fn admit_application(
        &self,
        application: Application,
        cap: Option<u32>,
    ) -> Result<Application, StorageError>;
    fn update_application(&self, application: Application) -> Result<(), StorageError>;
    fn fetch_application(&self, id: &ApplicationId) -> Result<Option<Application>, StorageError>;
    fn list_applications(&self) -> Result<Vec<Application>, StorageError>;
    fn count_applications_for_job(&self, job_id: &JobId) -> Result<usize, StorageError>;

    fn insert_note(&self, note: ApplicationNote) -> Result<ApplicationNote, StorageError>;
    /// Notes for one application, newest first.
    fn notes_for_application(
        &self,
        application_id: &ApplicationId,
    ) -> Result<Vec<ApplicationNote>, StorageError>;
}
