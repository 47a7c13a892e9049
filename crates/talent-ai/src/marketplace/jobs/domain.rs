use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::auth::OperatorId;
use super::super::error::ValidationError;

/// Identifier wrapper for job postings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobId(pub String);

/// Publication state of a posting.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    #[default]
    Draft,
    Published,
    Closed,
}

impl JobStatus {
    pub const fn label(self) -> &'static str {
        match self {
            JobStatus::Draft => "Draft",
            JobStatus::Published => "Published",
            JobStatus::Closed => "Closed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayType {
    Hourly,
    PerTask,
}

impl PayType {
    pub const fn label(self) -> &'static str {
        match self {
            PayType::Hourly => "Hourly",
            PayType::PerTask => "Per task",
        }
    }
}

/// Persisted job posting record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub slug: String,
    pub title: String,
    pub status: JobStatus,
    pub pay_min: i64,
    pub pay_max: i64,
    pub pay_type: PayType,
    pub time_commitment: String,
    pub remote_worldwide: bool,
    pub allowed_countries: Vec<String>,
    pub short_description: String,
    pub full_description: String,
    pub responsibilities: String,
    pub requirements: String,
    pub nice_to_have: Option<String>,
    pub skill_tags: Vec<String>,
    pub tools: Vec<String>,
    pub application_deadline: Option<DateTime<Utc>>,
    pub max_applications: Option<u32>,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub created_by: OperatorId,
}

/// Operator-supplied fields for create and full-record replace updates.
///
/// String fields default to empty so presence validation can enumerate the
/// missing wire names instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: JobStatus,
    #[serde(default)]
    pub pay_min: i64,
    #[serde(default)]
    pub pay_max: i64,
    #[serde(default)]
    pub pay_type: Option<PayType>,
    #[serde(default)]
    pub time_commitment: String,
    #[serde(default)]
    pub remote_worldwide: bool,
    #[serde(default)]
    pub allowed_countries: Vec<String>,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub full_description: String,
    #[serde(default)]
    pub responsibilities: String,
    #[serde(default)]
    pub requirements: String,
    #[serde(default)]
    pub nice_to_have: Option<String>,
    #[serde(default)]
    pub skill_tags: Vec<String>,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub application_deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub max_applications: Option<u32>,
}

impl JobDraft {
    /// Presence check first, then pay bounds. Wire names in submission order.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.short_description.trim().is_empty() {
            missing.push("shortDescription");
        }
        if self.full_description.trim().is_empty() {
            missing.push("fullDescription");
        }
        if self.responsibilities.trim().is_empty() {
            missing.push("responsibilities");
        }
        if self.requirements.trim().is_empty() {
            missing.push("requirements");
        }
        if self.pay_type.is_none() {
            missing.push("payType");
        }
        if self.time_commitment.trim().is_empty() {
            missing.push("timeCommitment");
        }
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        if self.pay_min < 0 || self.pay_max < 0 {
            return Err(ValidationError::NegativePayBounds);
        }

        Ok(())
    }

    /// Builds the persisted record from a validated draft. Identity, slug and
    /// stamp fields are decided by the lifecycle service.
    pub(crate) fn into_job(
        self,
        id: JobId,
        slug: String,
        published_at: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
        created_by: OperatorId,
    ) -> Job {
        let pay_type = self.pay_type.expect("draft validated before conversion");
        Job {
            id,
            slug,
            title: self.title.trim().to_string(),
            status: self.status,
            pay_min: self.pay_min,
            pay_max: self.pay_max,
            pay_type,
            time_commitment: self.time_commitment.trim().to_string(),
            remote_worldwide: self.remote_worldwide,
            allowed_countries: self.allowed_countries,
            short_description: self.short_description,
            full_description: self.full_description,
            responsibilities: self.responsibilities,
            requirements: self.requirements,
            nice_to_have: blank_to_none(self.nice_to_have),
            skill_tags: self.skill_tags,
            tools: self.tools,
            application_deadline: self.application_deadline,
            max_applications: self.max_applications,
            published_at,
            created_at,
            created_by,
        }
    }
}

pub(crate) fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

/// Allowed publication-state changes. The default table is permissive, which
/// matches the console's unrestricted status writes; a stricter table can be
/// injected without touching call sites.
#[derive(Debug, Clone, Default)]
pub struct JobTransitionPolicy {
    allowed: Option<BTreeSet<(JobStatus, JobStatus)>>,
}

impl JobTransitionPolicy {
    pub fn permissive() -> Self {
        Self::default()
    }

    pub fn with_allowed(pairs: impl IntoIterator<Item = (JobStatus, JobStatus)>) -> Self {
        Self {
            allowed: Some(pairs.into_iter().collect()),
        }
    }

    pub fn permits(&self, from: JobStatus, to: JobStatus) -> bool {
        if from == to {
            return true;
        }
        match &self.allowed {
            None => true,
            Some(pairs) => pairs.contains(&(from, to)),
        }
    }

    pub fn check(&self, from: JobStatus, to: JobStatus) -> Result<(), ValidationError> {
        if self.permits(from, to) {
            Ok(())
        } else {
            Err(ValidationError::InvalidTransition {
                from: from.label(),
                to: to.label(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_screaming_snake() {
        let encoded = serde_json::to_string(&JobStatus::Published).expect("serializes");
        assert_eq!(encoded, "\"PUBLISHED\"");
        let encoded = serde_json::to_string(&PayType::PerTask).expect("serializes");
        assert_eq!(encoded, "\"PER_TASK\"");
    }

    #[test]
    fn permissive_policy_allows_backward_moves() {
        let policy = JobTransitionPolicy::permissive();
        assert!(policy.permits(JobStatus::Closed, JobStatus::Draft));
        assert!(policy.permits(JobStatus::Published, JobStatus::Published));
    }

    #[test]
    fn explicit_policy_refuses_unlisted_pairs() {
        let policy = JobTransitionPolicy::with_allowed([
            (JobStatus::Draft, JobStatus::Published),
            (JobStatus::Published, JobStatus::Closed),
        ]);
        assert!(policy.permits(JobStatus::Draft, JobStatus::Published));
        assert!(!policy.permits(JobStatus::Closed, JobStatus::Draft));
        match policy.check(JobStatus::Closed, JobStatus::Draft) {
            Err(ValidationError::InvalidTransition { from, to }) => {
                assert_eq!(from, "Closed");
                assert_eq!(to, "Draft");
            }
            other => panic!("expected transition refusal, got {other:?}"),
        }
    }
}
