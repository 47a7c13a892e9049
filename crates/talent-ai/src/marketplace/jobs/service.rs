use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::super::auth::{require_operator, OperatorIdentity};
use super::super::clock::Clock;
use super::super::error::{ConflictError, LifecycleError, NotFoundError};
use super::super::store::{MarketplaceStore, StorageError};
use super::domain::{Job, JobDraft, JobId, JobStatus, JobTransitionPolicy};
use super::slug::SlugAllocator;

static JOB_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_job_id() -> JobId {
    let id = JOB_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    JobId(format!("job-{id:06}"))
}

/// Owns the posting record and its publication state machine.
pub struct JobLifecycleService<S, C> {
    store: Arc<S>,
    clock: Arc<C>,
    policy: JobTransitionPolicy,
}

impl<S, C> JobLifecycleService<S, C>
where
    S: MarketplaceStore + 'static,
    C: Clock + 'static,
{
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self::with_policy(store, clock, JobTransitionPolicy::permissive())
    }

    pub fn with_policy(store: Arc<S>, clock: Arc<C>, policy: JobTransitionPolicy) -> Self {
        Self {
            store,
            clock,
            policy,
        }
    }

    /// Creates a posting in DRAFT or PUBLISHED, allocating a fresh slug and
    /// stamping `published_at` when the initial status is PUBLISHED.
    pub fn create(
        &self,
        operator: Option<&OperatorIdentity>,
        draft: JobDraft,
    ) -> Result<Job, LifecycleError> {
        let operator = require_operator(operator)?;
        draft.validate()?;

        let slug = SlugAllocator::new(self.store.as_ref()).allocate(&draft.title, None)?;
        let now = self.clock.now();
        let published_at = (draft.status == JobStatus::Published).then_some(now);
        let job = draft.into_job(next_job_id(), slug, published_at, now, operator.id.clone());

        match self.store.insert_job(job) {
            Ok(job) => Ok(job),
            Err(StorageError::SlugTaken(slug)) => Err(ConflictError::SlugTaken(slug).into()),
            Err(other) => Err(other.into()),
        }
    }

    /// Full-record replace update. The slug is re-derived only when the
    /// title changed; `published_at` is stamped on the first transition into
    /// PUBLISHED and never reset afterwards.
    pub fn update(
        &self,
        operator: Option<&OperatorIdentity>,
        id: &JobId,
        draft: JobDraft,
    ) -> Result<Job, LifecycleError> {
        require_operator(operator)?;
        draft.validate()?;

        let existing = self.store.fetch_job(id)?.ok_or(NotFoundError::Job)?;
        self.policy.check(existing.status, draft.status)?;

        let slug = if draft.title.trim() != existing.title {
            SlugAllocator::new(self.store.as_ref()).allocate(&draft.title, Some(id))?
        } else {
            existing.slug.clone()
        };

        let published_at = match (draft.status, existing.published_at) {
            (JobStatus::Published, None) => Some(self.clock.now()),
            (_, stamped) => stamped,
        };

        let job = draft.into_job(
            existing.id.clone(),
            slug,
            published_at,
            existing.created_at,
            existing.created_by.clone(),
        );

        match self.store.update_job(job.clone()) {
            Ok(()) => Ok(job),
            Err(StorageError::SlugTaken(slug)) => Err(ConflictError::SlugTaken(slug).into()),
            Err(other) => Err(other.into()),
        }
    }

    /// Removes a posting, refused while any application still references it.
    pub fn delete(
        &self,
        operator: Option<&OperatorIdentity>,
        id: &JobId,
    ) -> Result<(), LifecycleError> {
        require_operator(operator)?;

        self.store.fetch_job(id)?.ok_or(NotFoundError::Job)?;
        if self.store.count_applications_for_job(id)? > 0 {
            return Err(ConflictError::JobHasApplications.into());
        }

        self.store.delete_job(id)?;
        Ok(())
    }

    pub fn get(&self, id: &JobId) -> Result<Job, LifecycleError> {
        self.store
            .fetch_job(id)?
            .ok_or_else(|| NotFoundError::Job.into())
    }
}
