use super::common::*;
use crate::marketplace::error::{ConflictError, LifecycleError};
use crate::marketplace::jobs::domain::JobStatus;
use crate::marketplace::jobs::slug::SlugAllocator;
use crate::marketplace::store::MarketplaceStore;

#[test]
fn colliding_titles_get_numbered_suffixes() {
    let (service, _store, _clock) = build_service();
    let op = operator();

    let first = service
        .create(Some(&op), draft("AI Data Annotator!!", JobStatus::Draft))
        .expect("first create");
    let second = service
        .create(Some(&op), draft("AI Data Annotator", JobStatus::Draft))
        .expect("second create");
    let third = service
        .create(Some(&op), draft("ai data ANNOTATOR??", JobStatus::Draft))
        .expect("third create");

    assert_eq!(first.slug, "ai-data-annotator");
    assert_eq!(second.slug, "ai-data-annotator-1");
    assert_eq!(third.slug, "ai-data-annotator-2");
}

#[test]
fn probe_reuses_freed_suffixes() {
    let (service, store, _clock) = build_service();
    let op = operator();

    service
        .create(Some(&op), draft("Search Rater", JobStatus::Draft))
        .expect("create");
    let second = service
        .create(Some(&op), draft("Search Rater", JobStatus::Draft))
        .expect("create");
    assert_eq!(second.slug, "search-rater-1");

    service
        .delete(Some(&op), &second.id)
        .expect("delete frees the suffix");

    let allocator = SlugAllocator::new(store.as_ref());
    let slug = allocator
        .allocate("Search Rater", None)
        .expect("probe succeeds");
    assert_eq!(slug, "search-rater-1");
}

#[test]
fn symbol_only_titles_normalize_to_an_empty_slug() {
    let (service, _store, _clock) = build_service();
    let op = operator();

    // "!!!" is non-blank so presence validation passes, but every
    // character is stripped by normalization.
    let first = service
        .create(Some(&op), draft("!!!", JobStatus::Draft))
        .expect("create");
    assert_eq!(first.slug, "");

    let second = service
        .create(Some(&op), draft("???", JobStatus::Draft))
        .expect("create");
    assert_eq!(second.slug, "-1");
}

#[test]
fn exclusion_keeps_own_slug_during_edits() {
    let (service, store, _clock) = build_service();
    let op = operator();

    let job = service
        .create(Some(&op), draft("Prompt Engineer", JobStatus::Draft))
        .expect("create");

    let allocator = SlugAllocator::new(store.as_ref());
    let reallocated = allocator
        .allocate("Prompt Engineer", Some(&job.id))
        .expect("probe succeeds");
    assert_eq!(reallocated, job.slug);
}

#[test]
fn racing_slug_write_surfaces_conflict() {
    let (service, store, _clock) = build_service();
    let op = operator();

    let existing = service
        .create(Some(&op), draft("Data Reviewer", JobStatus::Draft))
        .expect("create");

    // Simulate a racing writer landing on the probed slug between the
    // allocator's read and the insert.
    let mut rival = store
        .fetch_job(&existing.id)
        .expect("fetch")
        .expect("present");
    rival.id = crate::marketplace::jobs::domain::JobId("job-rival".to_string());
    match store.insert_job(rival) {
        Err(crate::marketplace::store::StorageError::SlugTaken(_)) => {}
        other => panic!("expected slug conflict, got {other:?}"),
    }

    // The service maps the storage conflict to the domain error.
    let result = service.create(Some(&op), draft("Data Reviewer", JobStatus::Draft));
    assert!(result.is_ok(), "allocator probes past the existing slug");
    let mut clashing = draft("Data Reviewer", JobStatus::Draft);
    clashing.title = "Data   Reviewer".to_string();
    match service.create(Some(&op), clashing) {
        Ok(job) => assert_eq!(job.slug, "data-reviewer-2"),
        Err(LifecycleError::Conflict(ConflictError::SlugTaken(_))) => {}
        other => panic!("expected allocation or conflict, got {other:?}"),
    }
}
