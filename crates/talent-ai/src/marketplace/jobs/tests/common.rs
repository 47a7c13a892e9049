use std::sync::Arc;

use chrono::{TimeZone, Utc};

use crate::marketplace::applications::domain::{
    Application, ApplicationId, ApplicationSource, ApplicationStatus,
};
use crate::marketplace::auth::{OperatorId, OperatorIdentity};
use crate::marketplace::clock::FixedClock;
use crate::marketplace::jobs::domain::{JobDraft, JobId, JobStatus, PayType};
use crate::marketplace::jobs::service::JobLifecycleService;
use crate::marketplace::store::MemoryStore;

pub(super) fn operator() -> OperatorIdentity {
    OperatorIdentity {
        id: OperatorId("op-1".to_string()),
        name: "Ava Reviewer".to_string(),
    }
}

pub(super) fn draft(title: &str, status: JobStatus) -> JobDraft {
    JobDraft {
        title: title.to_string(),
        status,
        pay_min: 15,
        pay_max: 25,
        pay_type: Some(PayType::Hourly),
        time_commitment: "10-20 hours/week".to_string(),
        remote_worldwide: true,
        short_description: "Annotate data for model training.".to_string(),
        full_description: "Label text, image and audio data.".to_string(),
        responsibilities: "Review and annotate data.".to_string(),
        requirements: "Strong attention to detail.".to_string(),
        ..JobDraft::default()
    }
}

pub(super) fn build_service() -> (
    JobLifecycleService<MemoryStore, FixedClock>,
    Arc<MemoryStore>,
    FixedClock,
) {
    let store = Arc::new(MemoryStore::default());
    let clock = FixedClock::at(Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap());
    let service = JobLifecycleService::new(store.clone(), Arc::new(clock.clone()));
    (service, store, clock)
}

/// Raw application record for store-level setup of delete-blocking tests.
pub(super) fn application_for(job_id: &JobId, suffix: &str) -> Application {
    Application {
        id: ApplicationId(format!("app-test-{suffix}")),
        job_id: job_id.clone(),
        full_name: "Priya Patel".to_string(),
        email: "priya@example.com".to_string(),
        phone: "+44 7700 900123".to_string(),
        country: "United Kingdom".to_string(),
        resume_url: "https://files.example.com/resume.pdf".to_string(),
        linkedin_url: None,
        portfolio_url: None,
        why_interested: "Flexible remote work".to_string(),
        relevant_experience: "Two years of labeling".to_string(),
        source: ApplicationSource::Other,
        status: ApplicationStatus::New,
        created_at: Utc.with_ymd_and_hms(2026, 3, 10, 10, 0, 0).unwrap(),
    }
}
