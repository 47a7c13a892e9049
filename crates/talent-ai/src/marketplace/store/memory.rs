use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::super::applications::domain::{Application, ApplicationId, ApplicationNote, NoteId};
use super::super::jobs::domain::{Job, JobId};
use super::{MarketplaceStore, StorageError};

#[derive(Debug, Default)]
struct Tables {
    jobs: HashMap<JobId, Job>,
    applications: HashMap<ApplicationId, Application>,
    notes: HashMap<NoteId, ApplicationNote>,
}

/// In-process store backing the service binary, the demo, and the tests.
/// One mutex over all three tables makes the compound operations (slug
/// probe + write, capacity count + insert) atomic.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().expect("store mutex poisoned")
    }
}

fn slug_conflict(tables: &Tables, slug: &str, exclude: Option<&JobId>) -> bool {
    tables
        .jobs
        .values()
        .any(|job| job.slug == slug && Some(&job.id) != exclude)
}

fn application_count(tables: &Tables, job_id: &JobId) -> usize {
    tables
        .applications
        .values()
        .filter(|application| &application.job_id == job_id)
        .count()
}

impl MarketplaceStore for MemoryStore {
    fn insert_job(&self, job: Job) -> Result<Job, StorageError> {
        let mut tables = self.lock();
        if tables.jobs.contains_key(&job.id) {
            return Err(StorageError::DuplicateRecord);
        }
        if slug_conflict(&tables, &job.slug, None) {
            return Err(StorageError::SlugTaken(job.slug));
        }
        tables.jobs.insert(job.id.clone(), job.clone());
        Ok(job)
    }

    fn update_job(&self, job: Job) -> Result<(), StorageError> {
        let mut tables = self.lock();
        if !tables.jobs.contains_key(&job.id) {
            return Err(StorageError::MissingRecord);
        }
        if slug_conflict(&tables, &job.slug, Some(&job.id)) {
            return Err(StorageError::SlugTaken(job.slug));
        }
        tables.jobs.insert(job.id.clone(), job);
        Ok(())
    }

    fn delete_job(&self, id: &JobId) -> Result<(), StorageError> {
        let mut tables = self.lock();
        tables
            .jobs
            .remove(id)
            .map(|_| ())
            .ok_or(StorageError::MissingRecord)
    }

    fn fetch_job(&self, id: &JobId) -> Result<Option<Job>, StorageError> {
        Ok(self.lock().jobs.get(id).cloned())
    }

    fn fetch_job_by_slug(&self, slug: &str) -> Result<Option<Job>, StorageError> {
        Ok(self
            .lock()
            .jobs
            .values()
            .find(|job| job.slug == slug)
            .cloned())
    }

    fn list_jobs(&self) -> Result<Vec<Job>, StorageError> {
        Ok(self.lock().jobs.values().cloned().collect())
    }

    fn slug_in_use(&self, slug: &str, exclude: Option<&JobId>) -> Result<bool, StorageError> {
        Ok(slug_conflict(&self.lock(), slug, exclude))
    }

    fn admit_application(
        &self,
        application: Application,
        cap: Option<u32>,
    ) -> Result<Application, StorageError> {
        let mut tables = self.lock();
        if tables.applications.contains_key(&application.id) {
            return Err(StorageError::DuplicateRecord);
        }
        if let Some(cap) = cap {
            if application_count(&tables, &application.job_id) >= cap as usize {
                return Err(StorageError::CapacityReached);
            }
        }
        tables
            .applications
            .insert(application.id.clone(), application.clone());
        Ok(application)
    }

    fn update_application(&self, application: Application) -> Result<(), StorageError> {
        let mut tables = self.lock();
        if !tables.applications.contains_key(&application.id) {
            return Err(StorageError::MissingRecord);
        }
        tables
            .applications
            .insert(application.id.clone(), application);
        Ok(())
    }

    fn fetch_application(&self, id: &ApplicationId) -> Result<Option<Application>, StorageError> {
        Ok(self.lock().applications.get(id).cloned())
    }

    fn list_applications(&self) -> Result<Vec<Application>, StorageError> {
        Ok(self.lock().applications.values().cloned().collect())
    }

    fn count_applications_for_job(&self, job_id: &JobId) -> Result<usize, StorageError> {
        Ok(application_count(&self.lock(), job_id))
    }

    fn insert_note(&self, note: ApplicationNote) -> Result<ApplicationNote, StorageError> {
        let mut tables = self.lock();
        if tables.notes.contains_key(&note.id) {
            return Err(StorageError::DuplicateRecord);
        }
        tables.notes.insert(note.id.clone(), note.clone());
        Ok(note)
    }

    fn notes_for_application(
        &self,
        application_id: &ApplicationId,
    ) -> Result<Vec<ApplicationNote>, StorageError> {
        let tables = self.lock();
        let mut notes: Vec<ApplicationNote> = tables
            .notes
            .values()
            .filter(|note| &note.application_id == application_id)
            .cloned()
            .collect();
        // Ids are monotonic, which breaks ties when a fixed clock stamps
        // two notes with the same instant.
        notes.sort_by(|a, b| (&b.created_at, &b.id).cmp(&(&a.created_at, &a.id)));
        Ok(notes)
    }
}
