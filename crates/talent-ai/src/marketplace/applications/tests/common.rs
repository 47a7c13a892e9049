use std::sync::Arc;

use chrono::{TimeZone, Utc};

use crate::marketplace::applications::domain::IntakeSubmission;
use crate::marketplace::applications::intake::ApplicationIntake;
use crate::marketplace::applications::review::ApplicationReviewService;
use crate::marketplace::auth::{OperatorId, OperatorIdentity};
use crate::marketplace::clock::FixedClock;
use crate::marketplace::jobs::domain::{Job, JobDraft, JobStatus, PayType};
use crate::marketplace::jobs::service::JobLifecycleService;
use crate::marketplace::store::MemoryStore;

pub(super) struct Harness {
    pub(super) jobs: JobLifecycleService<MemoryStore, FixedClock>,
    pub(super) intake: ApplicationIntake<MemoryStore, FixedClock>,
    pub(super) review: ApplicationReviewService<MemoryStore, FixedClock>,
    pub(super) store: Arc<MemoryStore>,
    pub(super) clock: FixedClock,
}

pub(super) fn harness() -> Harness {
    let store = Arc::new(MemoryStore::default());
    let clock = FixedClock::at(Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap());
    let shared_clock = Arc::new(clock.clone());
    Harness {
        jobs: JobLifecycleService::new(store.clone(), shared_clock.clone()),
        intake: ApplicationIntake::new(store.clone(), shared_clock.clone()),
        review: ApplicationReviewService::new(store.clone(), shared_clock),
        store,
        clock,
    }
}

pub(super) fn operator() -> OperatorIdentity {
    OperatorIdentity {
        id: OperatorId("op-1".to_string()),
        name: "Ava Reviewer".to_string(),
    }
}

pub(super) fn job_draft(title: &str, status: JobStatus, cap: Option<u32>) -> JobDraft {
    JobDraft {
        title: title.to_string(),
        status,
        pay_min: 15,
        pay_max: 25,
        pay_type: Some(PayType::Hourly),
        time_commitment: "10-20 hours/week".to_string(),
        short_description: "Annotate data for model training.".to_string(),
        full_description: "Label text, image and audio data.".to_string(),
        responsibilities: "Review and annotate data.".to_string(),
        requirements: "Strong attention to detail.".to_string(),
        max_applications: cap,
        ..JobDraft::default()
    }
}

pub(super) fn published_job(harness: &Harness, title: &str, cap: Option<u32>) -> Job {
    harness
        .jobs
        .create(Some(&operator()), job_draft(title, JobStatus::Published, cap))
        .expect("published job")
}

pub(super) fn submission(job_id: &str) -> IntakeSubmission {
    IntakeSubmission {
        job_id: job_id.to_string(),
        full_name: "Priya Patel".to_string(),
        email: "priya@example.com".to_string(),
        phone: "+44 7700 900123".to_string(),
        country: "United Kingdom".to_string(),
        resume_url: "https://files.example.com/resumes/priya.pdf".to_string(),
        why_interested: "Flexible remote work on AI projects.".to_string(),
        relevant_experience: "Two years of annotation work.".to_string(),
        ..IntakeSubmission::default()
    }
}
