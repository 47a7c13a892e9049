use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::super::clock::Clock;
use super::super::error::{CapacityError, LifecycleError, NotFoundError, ValidationError};
use super::super::jobs::domain::{blank_to_none, JobId, JobStatus};
use super::super::store::{MarketplaceStore, StorageError};
use super::domain::{Application, ApplicationId, ApplicationStatus, IntakeSubmission};

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("app-{id:06}"))
}

/// Validates and admits public submissions against a target job.
pub struct ApplicationIntake<S, C> {
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> ApplicationIntake<S, C>
where
    S: MarketplaceStore + 'static,
    C: Clock + 'static,
{
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Short-circuit validation in order: required fields, job accepting
    /// applications, capacity. The capacity check and the insert run as one
    /// storage step, so two racing admissions cannot both squeeze under the
    /// cap.
    pub fn admit(&self, submission: IntakeSubmission) -> Result<Application, LifecycleError> {
        let missing = submission.missing_fields();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing).into());
        }

        let job_id = JobId(submission.job_id.trim().to_string());
        let job = self
            .store
            .fetch_job(&job_id)?
            .filter(|job| job.status == JobStatus::Published)
            .ok_or(NotFoundError::JobNotAcceptingApplications)?;

        let application = Application {
            id: next_application_id(),
            job_id: job.id.clone(),
            full_name: submission.full_name.trim().to_string(),
            email: submission.email.trim().to_string(),
            phone: submission.phone.trim().to_string(),
            country: submission.country.trim().to_string(),
            resume_url: submission.resume_url.trim().to_string(),
            linkedin_url: blank_to_none(submission.linkedin_url),
            portfolio_url: blank_to_none(submission.portfolio_url),
            why_interested: submission.why_interested,
            relevant_experience: submission.relevant_experience,
            source: submission.source.unwrap_or_default(),
            status: ApplicationStatus::New,
            created_at: self.clock.now(),
        };

        match self.store.admit_application(application, job.max_applications) {
            Ok(stored) => Ok(stored),
            Err(StorageError::CapacityReached) => Err(CapacityError.into()),
            Err(other) => Err(other.into()),
        }
    }
}
