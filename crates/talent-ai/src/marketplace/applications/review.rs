use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::super::auth::{require_operator, OperatorIdentity};
use super::super::clock::Clock;
use super::super::error::{LifecycleError, NotFoundError, ValidationError};
use super::super::store::MarketplaceStore;
use super::domain::{
    Application, ApplicationId, ApplicationNote, ApplicationStatus, NoteId, ReviewTransitionPolicy,
};

static NOTE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_note_id() -> NoteId {
    let id = NOTE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    NoteId(format!("note-{id:06}"))
}

/// Console-side review operations: status tracking and the append-only
/// note ledger.
pub struct ApplicationReviewService<S, C> {
    store: Arc<S>,
    clock: Arc<C>,
    policy: ReviewTransitionPolicy,
}

impl<S, C> ApplicationReviewService<S, C>
where
    S: MarketplaceStore + 'static,
    C: Clock + 'static,
{
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self::with_policy(store, clock, ReviewTransitionPolicy::permissive())
    }

    pub fn with_policy(store: Arc<S>, clock: Arc<C>, policy: ReviewTransitionPolicy) -> Self {
        Self {
            store,
            clock,
            policy,
        }
    }

    /// Moves an application to a new review status. No prior-status history
    /// is kept; the note ledger is the audit trail.
    pub fn set_status(
        &self,
        operator: Option<&OperatorIdentity>,
        id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<Application, LifecycleError> {
        require_operator(operator)?;

        let mut application = self
            .store
            .fetch_application(id)?
            .ok_or(NotFoundError::Application)?;
        self.policy.check(application.status, status)?;

        application.status = status;
        self.store.update_application(application.clone())?;
        Ok(application)
    }

    /// Appends a reviewer note. Text must be non-empty after trimming;
    /// notes can never be edited or removed.
    pub fn append_note(
        &self,
        operator: Option<&OperatorIdentity>,
        id: &ApplicationId,
        text: &str,
    ) -> Result<ApplicationNote, LifecycleError> {
        let operator = require_operator(operator)?;

        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyNoteText.into());
        }

        self.store
            .fetch_application(id)?
            .ok_or(NotFoundError::Application)?;

        let note = ApplicationNote {
            id: next_note_id(),
            application_id: id.clone(),
            author_id: operator.id.clone(),
            note_text: text.to_string(),
            created_at: self.clock.now(),
        };

        Ok(self.store.insert_note(note)?)
    }

    /// Notes for one application, newest first.
    pub fn notes(&self, id: &ApplicationId) -> Result<Vec<ApplicationNote>, LifecycleError> {
        self.store
            .fetch_application(id)?
            .ok_or(NotFoundError::Application)?;
        Ok(self.store.notes_for_application(id)?)
    }

    pub fn get(&self, id: &ApplicationId) -> Result<Application, LifecycleError> {
        self.store
            .fetch_application(id)?
            .ok_or_else(|| NotFoundError::Application.into())
    }
}
