//! Read-only projections over jobs, applications, and notes. No state of
//! its own; every view is recomputed from the store on demand.

pub mod views;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Duration;
use serde::Deserialize;

use super::applications::domain::{Application, ApplicationId, ApplicationStatus};
use super::auth::OperatorDirectory;
use super::clock::Clock;
use super::error::{LifecycleError, NotFoundError};
use super::jobs::domain::{Job, JobId, JobStatus};
use super::store::MarketplaceStore;
use views::{
    ApplicationDetailView, ApplicationListEntry, ApplicationStats, DashboardView, JobListEntry,
    JobOption, JobStats, NoteView, Page, PublicJobCard, RecentApplicationView,
};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;
const RECENT_APPLICATIONS_LIMIT: usize = 10;

/// Console job listing filter, taken straight from the query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListFilter {
    pub status: Option<JobStatus>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Console application listing filter.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationListFilter {
    pub job: Option<String>,
    pub status: Option<ApplicationStatus>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

pub struct ReportService<S, C> {
    store: Arc<S>,
    clock: Arc<C>,
    directory: Arc<dyn OperatorDirectory>,
}

impl<S, C> ReportService<S, C>
where
    S: MarketplaceStore + 'static,
    C: Clock + 'static,
{
    pub fn new(store: Arc<S>, clock: Arc<C>, directory: Arc<dyn OperatorDirectory>) -> Self {
        Self {
            store,
            clock,
            directory,
        }
    }

    /// Console dashboard: job counts by status, intake volume over the
    /// trailing 7 days, review breakdown, and the most recent submissions.
    pub fn dashboard(&self) -> Result<DashboardView, LifecycleError> {
        let jobs = self.store.list_jobs()?;
        let job_stats = JobStats {
            open_jobs: count_by_status(&jobs, JobStatus::Published),
            draft_jobs: count_by_status(&jobs, JobStatus::Draft),
            closed_jobs: count_by_status(&jobs, JobStatus::Closed),
        };

        let applications = self.applications_newest_first()?;
        let seven_days_ago = self.clock.now() - Duration::days(7);
        let application_stats = ApplicationStats {
            applications_last_7_days: applications
                .iter()
                .filter(|application| application.created_at >= seven_days_ago)
                .count(),
            pending_review: applications
                .iter()
                .filter(|application| application.status == ApplicationStatus::New)
                .count(),
            shortlisted: applications
                .iter()
                .filter(|application| application.status == ApplicationStatus::Shortlisted)
                .count(),
            total_applications: applications.len(),
        };

        let titles = job_index(&jobs);
        let recent_applications = applications
            .iter()
            .take(RECENT_APPLICATIONS_LIMIT)
            .map(|application| {
                let (job_title, job_slug) = titles
                    .get(&application.job_id)
                    .map(|job| (job.title.clone(), job.slug.clone()))
                    .unwrap_or_default();
                RecentApplicationView {
                    id: application.id.clone(),
                    full_name: application.full_name.clone(),
                    email: application.email.clone(),
                    status: application.status,
                    status_label: application.status.label(),
                    created_at: application.created_at,
                    job_title,
                    job_slug,
                }
            })
            .collect();

        Ok(DashboardView {
            job_stats,
            application_stats,
            recent_applications,
        })
    }

    /// Published postings as public cards, newest `published_at` first.
    pub fn published_jobs(&self) -> Result<Vec<PublicJobCard>, LifecycleError> {
        let mut jobs: Vec<Job> = self
            .store
            .list_jobs()?
            .into_iter()
            .filter(|job| job.status == JobStatus::Published)
            .collect();
        jobs.sort_by(|a, b| (&b.published_at, &b.id).cmp(&(&a.published_at, &a.id)));
        Ok(jobs.iter().map(PublicJobCard::from_job).collect())
    }

    /// Full posting for the public detail page; hidden unless PUBLISHED.
    pub fn published_job_detail(&self, slug: &str) -> Result<Job, LifecycleError> {
        self.store
            .fetch_job_by_slug(slug)?
            .filter(|job| job.status == JobStatus::Published)
            .ok_or_else(|| NotFoundError::Job.into())
    }

    /// Console posting listing: newest first, filterable by status and
    /// case-insensitive title substring, paginated.
    pub fn jobs_page(&self, filter: &JobListFilter) -> Result<Page<JobListEntry>, LifecycleError> {
        let mut jobs = self.store.list_jobs()?;
        jobs.sort_by(|a, b| (&b.created_at, &b.id).cmp(&(&a.created_at, &a.id)));

        let search = normalized_search(filter.search.as_deref());
        let mut entries = Vec::new();
        for job in jobs {
            if let Some(status) = filter.status {
                if job.status != status {
                    continue;
                }
            }
            if let Some(needle) = &search {
                if !job.title.to_lowercase().contains(needle) {
                    continue;
                }
            }
            let application_count = self.store.count_applications_for_job(&job.id)?;
            entries.push(JobListEntry {
                job,
                application_count,
            });
        }

        Ok(paginate(entries, filter.page, filter.per_page))
    }

    /// Posting options for the console filter dropdown, title order.
    pub fn job_filter_options(&self) -> Result<Vec<JobOption>, LifecycleError> {
        let mut jobs = self.store.list_jobs()?;
        jobs.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
        Ok(jobs
            .into_iter()
            .map(|job| JobOption {
                id: job.id,
                title: job.title,
            })
            .collect())
    }

    /// Console application listing: newest first, filterable by parent job,
    /// review status, and case-insensitive substring over name/email.
    pub fn applications_page(
        &self,
        filter: &ApplicationListFilter,
    ) -> Result<Page<ApplicationListEntry>, LifecycleError> {
        let applications = self.applications_newest_first()?;
        let jobs = self.store.list_jobs()?;
        let titles = job_index(&jobs);
        let job_filter = filter
            .job
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| JobId(id.to_string()));
        let search = normalized_search(filter.search.as_deref());

        let entries = applications
            .into_iter()
            .filter(|application| match &job_filter {
                Some(job_id) => &application.job_id == job_id,
                None => true,
            })
            .filter(|application| match filter.status {
                Some(status) => application.status == status,
                None => true,
            })
            .filter(|application| match &search {
                Some(needle) => {
                    application.full_name.to_lowercase().contains(needle)
                        || application.email.to_lowercase().contains(needle)
                }
                None => true,
            })
            .map(|application| {
                let (job_title, job_slug) = titles
                    .get(&application.job_id)
                    .map(|job| (job.title.clone(), job.slug.clone()))
                    .unwrap_or_default();
                ApplicationListEntry {
                    application,
                    job_title,
                    job_slug,
                }
            })
            .collect();

        Ok(paginate(entries, filter.page, filter.per_page))
    }

    /// Every application joined with its parent job title, newest first,
    /// for the CSV export.
    pub fn applications_export(&self) -> Result<Vec<ApplicationListEntry>, LifecycleError> {
        let page = self.applications_page(&ApplicationListFilter {
            per_page: Some(MAX_PAGE_SIZE),
            ..ApplicationListFilter::default()
        })?;
        if page.total <= page.items.len() {
            return Ok(page.items);
        }

        let mut items = page.items;
        let mut next = 2u32;
        while items.len() < page.total {
            let chunk = self.applications_page(&ApplicationListFilter {
                page: Some(next),
                per_page: Some(MAX_PAGE_SIZE),
                ..ApplicationListFilter::default()
            })?;
            if chunk.items.is_empty() {
                break;
            }
            items.extend(chunk.items);
            next += 1;
        }
        Ok(items)
    }

    /// Review detail: the application, its parent posting, and the note
    /// ledger newest first with author names joined through the directory.
    pub fn application_detail(
        &self,
        id: &ApplicationId,
    ) -> Result<ApplicationDetailView, LifecycleError> {
        let application = self
            .store
            .fetch_application(id)?
            .ok_or(NotFoundError::Application)?;
        let (job_title, job_slug) = self
            .store
            .fetch_job(&application.job_id)?
            .map(|job| (job.title, job.slug))
            .unwrap_or_default();

        let notes = self
            .store
            .notes_for_application(id)?
            .into_iter()
            .map(|note| {
                let author_name = self
                    .directory
                    .display_name(&note.author_id)
                    .unwrap_or_else(|| note.author_id.0.clone());
                NoteView {
                    id: note.id,
                    note_text: note.note_text,
                    author_id: note.author_id,
                    author_name,
                    created_at: note.created_at,
                }
            })
            .collect();

        Ok(ApplicationDetailView {
            application,
            job_title,
            job_slug,
            notes,
        })
    }

    fn applications_newest_first(&self) -> Result<Vec<Application>, LifecycleError> {
        let mut applications = self.store.list_applications()?;
        applications.sort_by(|a, b| (&b.created_at, &b.id).cmp(&(&a.created_at, &a.id)));
        Ok(applications)
    }
}

fn count_by_status(jobs: &[Job], status: JobStatus) -> usize {
    jobs.iter().filter(|job| job.status == status).count()
}

fn job_index(jobs: &[Job]) -> HashMap<JobId, &Job> {
    jobs.iter().map(|job| (job.id.clone(), job)).collect()
}

fn normalized_search(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|needle| !needle.is_empty())
        .map(str::to_lowercase)
}

fn paginate<T>(items: Vec<T>, page: Option<u32>, per_page: Option<u32>) -> Page<T> {
    let per_page = per_page.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let page = page.unwrap_or(1).max(1);
    let total = items.len();

    let start = (page as usize - 1).saturating_mul(per_page as usize);
    let items = items
        .into_iter()
        .skip(start)
        .take(per_page as usize)
        .collect();

    Page {
        items,
        page,
        per_page,
        total,
    }
}
