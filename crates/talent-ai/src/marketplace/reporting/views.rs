use chrono::{DateTime, Utc};
use serde::Serialize;

use super::super::applications::domain::{
    Application, ApplicationId, ApplicationStatus, NoteId,
};
use super::super::auth::OperatorId;
use super::super::jobs::domain::{Job, JobId, PayType};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStats {
    pub open_jobs: usize,
    pub draft_jobs: usize,
    pub closed_jobs: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationStats {
    pub applications_last_7_days: usize,
    pub pending_review: usize,
    pub shortlisted: usize,
    pub total_applications: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentApplicationView {
    pub id: ApplicationId,
    pub full_name: String,
    pub email: String,
    pub status: ApplicationStatus,
    pub status_label: &'static str,
    pub created_at: DateTime<Utc>,
    pub job_title: String,
    pub job_slug: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub job_stats: JobStats,
    pub application_stats: ApplicationStats,
    pub recent_applications: Vec<RecentApplicationView>,
}

/// Public listing card, published postings only.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicJobCard {
    pub id: JobId,
    pub slug: String,
    pub title: String,
    pub pay_min: i64,
    pub pay_max: i64,
    pub pay_type: PayType,
    pub time_commitment: String,
    pub remote_worldwide: bool,
    pub skill_tags: Vec<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub short_description: String,
}

impl PublicJobCard {
    pub fn from_job(job: &Job) -> Self {
        Self {
            id: job.id.clone(),
            slug: job.slug.clone(),
            title: job.title.clone(),
            pay_min: job.pay_min,
            pay_max: job.pay_max,
            pay_type: job.pay_type,
            time_commitment: job.time_commitment.clone(),
            remote_worldwide: job.remote_worldwide,
            skill_tags: job.skill_tags.clone(),
            published_at: job.published_at,
            short_description: job.short_description.clone(),
        }
    }
}

/// Console listing row: full posting plus its application count.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListEntry {
    #[serde(flatten)]
    pub job: Job,
    pub application_count: usize,
}

/// Filter dropdown option.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobOption {
    pub id: JobId,
    pub title: String,
}

/// Console listing row joined with the parent posting.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationListEntry {
    #[serde(flatten)]
    pub application: Application,
    pub job_title: String,
    pub job_slug: String,
}

/// Reviewer note with the author name joined at read time.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteView {
    pub id: NoteId,
    pub note_text: String,
    pub author_id: OperatorId,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDetailView {
    #[serde(flatten)]
    pub application: Application,
    pub job_title: String,
    pub job_slug: String,
    pub notes: Vec<NoteView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: usize,
}
