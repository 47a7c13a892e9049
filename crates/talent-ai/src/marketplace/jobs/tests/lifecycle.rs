use super::common::*;
use crate::marketplace::error::{
    ConflictError, LifecycleError, NotFoundError, UnauthorizedError, ValidationError,
};
use crate::marketplace::jobs::domain::{JobDraft, JobId, JobStatus, JobTransitionPolicy};
use crate::marketplace::jobs::service::JobLifecycleService;
use crate::marketplace::store::MarketplaceStore;
use chrono::Duration;
use std::sync::Arc;

#[test]
fn create_requires_operator_identity() {
    let (service, _store, _clock) = build_service();
    match service.create(None, draft("Annotator", JobStatus::Draft)) {
        Err(LifecycleError::Unauthorized(UnauthorizedError)) => {}
        other => panic!("expected unauthorized, got {other:?}"),
    }
}

#[test]
fn create_enumerates_missing_fields() {
    let (service, _store, _clock) = build_service();
    let draft = JobDraft {
        title: "Annotator".to_string(),
        pay_min: 15,
        pay_max: 25,
        ..JobDraft::default()
    };

    match service.create(Some(&operator()), draft) {
        Err(LifecycleError::Validation(ValidationError::MissingFields(fields))) => {
            assert_eq!(
                fields,
                vec![
                    "shortDescription",
                    "fullDescription",
                    "responsibilities",
                    "requirements",
                    "payType",
                    "timeCommitment",
                ]
            );
        }
        other => panic!("expected missing fields, got {other:?}"),
    }
}

#[test]
fn create_rejects_negative_pay_bounds() {
    let (service, _store, _clock) = build_service();
    let mut negative = draft("Annotator", JobStatus::Draft);
    negative.pay_min = -1;

    match service.create(Some(&operator()), negative) {
        Err(LifecycleError::Validation(ValidationError::NegativePayBounds)) => {}
        other => panic!("expected pay bound rejection, got {other:?}"),
    }
}

#[test]
fn publishing_at_create_stamps_published_at() {
    let (service, _store, clock) = build_service();
    use crate::marketplace::clock::Clock;

    let job = service
        .create(Some(&operator()), draft("Annotator", JobStatus::Published))
        .expect("create");
    assert_eq!(job.published_at, Some(clock.now()));
    assert_eq!(job.created_at, clock.now());
    assert_eq!(job.created_by, operator().id);

    let drafted = service
        .create(Some(&operator()), draft("Rater", JobStatus::Draft))
        .expect("create");
    assert_eq!(drafted.published_at, None);
}

#[test]
fn republish_never_moves_the_first_publish_stamp() {
    let (service, _store, clock) = build_service();
    let op = operator();

    let job = service
        .create(Some(&op), draft("Annotator", JobStatus::Draft))
        .expect("create");
    assert_eq!(job.published_at, None);

    clock.advance(Duration::days(1));
    let published = service
        .update(Some(&op), &job.id, draft("Annotator", JobStatus::Published))
        .expect("publish");
    let first_stamp = published.published_at.expect("stamped on first publish");

    clock.advance(Duration::days(3));
    let closed = service
        .update(Some(&op), &job.id, draft("Annotator", JobStatus::Closed))
        .expect("close");
    assert_eq!(closed.published_at, Some(first_stamp));

    clock.advance(Duration::days(3));
    let republished = service
        .update(Some(&op), &job.id, draft("Annotator", JobStatus::Published))
        .expect("republish");
    assert_eq!(republished.published_at, Some(first_stamp));
}

#[test]
fn update_rederives_slug_only_on_title_change() {
    let (service, _store, _clock) = build_service();
    let op = operator();

    let job = service
        .create(Some(&op), draft("AI Data Annotator", JobStatus::Draft))
        .expect("create");
    assert_eq!(job.slug, "ai-data-annotator");

    let mut retitled = draft("AI Data Annotator", JobStatus::Draft);
    retitled.pay_max = 30;
    let updated = service
        .update(Some(&op), &job.id, retitled)
        .expect("update without title change");
    assert_eq!(updated.slug, "ai-data-annotator");
    assert_eq!(updated.pay_max, 30);

    let renamed = service
        .update(Some(&op), &job.id, draft("Senior Data Annotator", JobStatus::Draft))
        .expect("update with title change");
    assert_eq!(renamed.slug, "senior-data-annotator");
}

#[test]
fn update_unknown_job_is_not_found() {
    let (service, _store, _clock) = build_service();
    match service.update(
        Some(&operator()),
        &JobId("job-missing".to_string()),
        draft("Annotator", JobStatus::Draft),
    ) {
        Err(LifecycleError::NotFound(NotFoundError::Job)) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn delete_blocked_while_applications_exist() {
    let (service, store, _clock) = build_service();
    let op = operator();

    let job = service
        .create(Some(&op), draft("Annotator", JobStatus::Published))
        .expect("create");
    store
        .admit_application(application_for(&job.id, "1"), None)
        .expect("seed application");

    match service.delete(Some(&op), &job.id) {
        Err(LifecycleError::Conflict(ConflictError::JobHasApplications)) => {}
        other => panic!("expected delete refusal, got {other:?}"),
    }

    // Still queryable after the refused delete.
    assert!(service.get(&job.id).is_ok());
}

#[test]
fn delete_removes_job_without_applications() {
    let (service, _store, _clock) = build_service();
    let op = operator();

    let job = service
        .create(Some(&op), draft("Annotator", JobStatus::Draft))
        .expect("create");
    service.delete(Some(&op), &job.id).expect("delete succeeds");

    match service.get(&job.id) {
        Err(LifecycleError::NotFound(NotFoundError::Job)) => {}
        other => panic!("expected not found after delete, got {other:?}"),
    }
}

#[test]
fn strict_policy_refuses_reopening_closed_jobs() {
    let (_, store, clock) = build_service();
    let service = JobLifecycleService::with_policy(
        store,
        Arc::new(clock),
        JobTransitionPolicy::with_allowed([
            (JobStatus::Draft, JobStatus::Published),
            (JobStatus::Published, JobStatus::Closed),
        ]),
    );
    let op = operator();

    let job = service
        .create(Some(&op), draft("Annotator", JobStatus::Published))
        .expect("create");
    service
        .update(Some(&op), &job.id, draft("Annotator", JobStatus::Closed))
        .expect("closing is allowed");

    match service.update(Some(&op), &job.id, draft("Annotator", JobStatus::Draft)) {
        Err(LifecycleError::Validation(ValidationError::InvalidTransition { from, to })) => {
            assert_eq!(from, "Closed");
            assert_eq!(to, "Draft");
        }
        other => panic!("expected transition refusal, got {other:?}"),
    }
}
