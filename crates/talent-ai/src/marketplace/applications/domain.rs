use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::auth::OperatorId;
use super::super::jobs::domain::JobId;

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Identifier wrapper for reviewer notes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NoteId(pub String);

/// Review state tracked for every accepted application.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    #[default]
    New,
    Reviewing,
    Shortlisted,
    Rejected,
    Hired,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::New => "New",
            ApplicationStatus::Reviewing => "Reviewing",
            ApplicationStatus::Shortlisted => "Shortlisted",
            ApplicationStatus::Rejected => "Rejected",
            ApplicationStatus::Hired => "Hired",
        }
    }

    /// Raw wire value matching the serde rename, for surfaces that must
    /// emit the stored vocabulary rather than the display label.
    pub const fn wire_name(self) -> &'static str {
        match self {
            ApplicationStatus::New => "NEW",
            ApplicationStatus::Reviewing => "REVIEWING",
            ApplicationStatus::Shortlisted => "SHORTLISTED",
            ApplicationStatus::Rejected => "REJECTED",
            ApplicationStatus::Hired => "HIRED",
        }
    }
}

/// Where the applicant heard about the posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationSource {
    Linkedin,
    Twitter,
    Referral,
    Google,
    #[default]
    Other,
}

impl ApplicationSource {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationSource::Linkedin => "LinkedIn",
            ApplicationSource::Twitter => "Twitter",
            ApplicationSource::Referral => "Referral",
            ApplicationSource::Google => "Google",
            ApplicationSource::Other => "Other",
        }
    }

    /// Raw wire value matching the serde rename.
    pub const fn wire_name(self) -> &'static str {
        match self {
            ApplicationSource::Linkedin => "LINKEDIN",
            ApplicationSource::Twitter => "TWITTER",
            ApplicationSource::Referral => "REFERRAL",
            ApplicationSource::Google => "GOOGLE",
            ApplicationSource::Other => "OTHER",
        }
    }
}

/// Persisted application record. The job relationship is immutable after
/// admission and the record is never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub resume_url: String,
    pub linkedin_url: Option<String>,
    pub portfolio_url: Option<String>,
    pub why_interested: String,
    pub relevant_experience: String,
    pub source: ApplicationSource,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
}

/// Raw public-form payload. Everything defaults so the presence scan can
/// report which wire fields were left blank.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeSubmission {
    #[serde(default)]
    pub job_id: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub resume_url: String,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub portfolio_url: Option<String>,
    #[serde(default)]
    pub why_interested: String,
    #[serde(default)]
    pub relevant_experience: String,
    #[serde(default)]
    pub source: Option<ApplicationSource>,
}

impl IntakeSubmission {
    /// Ordered scan over the required fields, wire names as submitted.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.job_id.trim().is_empty() {
            missing.push("jobId");
        }
        if self.full_name.trim().is_empty() {
            missing.push("fullName");
        }
        if self.email.trim().is_empty() {
            missing.push("email");
        }
        if self.phone.trim().is_empty() {
            missing.push("phone");
        }
        if self.country.trim().is_empty() {
            missing.push("country");
        }
        if self.resume_url.trim().is_empty() {
            missing.push("resumeUrl");
        }
        if self.why_interested.trim().is_empty() {
            missing.push("whyInterested");
        }
        if self.relevant_experience.trim().is_empty() {
            missing.push("relevantExperience");
        }
        missing
    }
}

/// Append-only reviewer annotation. Author display names resolve through the
/// operator directory at read time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationNote {
    pub id: NoteId,
    pub application_id: ApplicationId,
    pub author_id: OperatorId,
    pub note_text: String,
    pub created_at: DateTime<Utc>,
}

/// Allowed review-status changes; permissive by default, mirroring the
/// console's unrestricted writes.
#[derive(Debug, Clone, Default)]
pub struct ReviewTransitionPolicy {
    allowed: Option<BTreeSet<(ApplicationStatus, ApplicationStatus)>>,
}

impl ReviewTransitionPolicy {
    pub fn permissive() -> Self {
        Self::default()
    }

    pub fn with_allowed(
        pairs: impl IntoIterator<Item = (ApplicationStatus, ApplicationStatus)>,
    ) -> Self {
        Self {
            allowed: Some(pairs.into_iter().collect()),
        }
    }

    pub fn permits(&self, from: ApplicationStatus, to: ApplicationStatus) -> bool {
        if from == to {
            return true;
        }
        match &self.allowed {
            None => true,
            Some(pairs) => pairs.contains(&(from, to)),
        }
    }

    pub fn check(
        &self,
        from: ApplicationStatus,
        to: ApplicationStatus,
    ) -> Result<(), super::super::error::ValidationError> {
        if self.permits(from, to) {
            Ok(())
        } else {
            Err(super::super::error::ValidationError::InvalidTransition {
                from: from.label(),
                to: to.label(),
            })
        }
    }
}
