use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use super::store::StorageError;

/// Malformed or incomplete input on an otherwise well-routed request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("pay bounds must not be negative")]
    NegativePayBounds,
    #[error("note text is required")]
    EmptyNoteText,
    #[error("status change {from} -> {to} is not allowed")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NotFoundError {
    #[error("job not found")]
    Job,
    #[error("job not found or not accepting applications")]
    JobNotAcceptingApplications,
    #[error("application not found")]
    Application,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConflictError {
    #[error("cannot delete job with existing applications")]
    JobHasApplications,
    #[error("slug '{0}' is already in use")]
    SlugTaken(String),
}

/// The target job's application cap has been reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("this position is no longer accepting applications")]
pub struct CapacityError;

/// The caller supplied no operator identity on a console operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("operator identity required")]
pub struct UnauthorizedError;

/// Umbrella error for every lifecycle operation, mapped to HTTP at the
/// router boundary.
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
    #[error(transparent)]
    Conflict(#[from] ConflictError),
    #[error(transparent)]
    Capacity(#[from] CapacityError),
    #[error(transparent)]
    Unauthorized(#[from] UnauthorizedError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl LifecycleError {
    /// Stable machine-readable code for client-side dispatch.
    pub const fn code(&self) -> &'static str {
        match self {
            LifecycleError::Validation(_) => "validation_failed",
            LifecycleError::NotFound(_) => "not_found",
            LifecycleError::Conflict(_) => "conflict",
            LifecycleError::Capacity(_) => "capacity_reached",
            LifecycleError::Unauthorized(_) => "unauthorized",
            LifecycleError::Storage(_) => "storage_failure",
        }
    }
}

impl IntoResponse for LifecycleError {
    fn into_response(self) -> Response {
        let status = match &self {
            LifecycleError::Validation(_) | LifecycleError::Capacity(_) => StatusCode::BAD_REQUEST,
            LifecycleError::NotFound(_) => StatusCode::NOT_FOUND,
            LifecycleError::Conflict(_) => StatusCode::CONFLICT,
            LifecycleError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            LifecycleError::Storage(err) => {
                tracing::error!(error = %err, "storage collaborator failure");
                let body = Json(json!({
                    "error": "storage failure",
                    "code": self.code(),
                }));
                return (StatusCode::INTERNAL_SERVER_ERROR, body).into_response();
            }
        };

        let body = Json(json!({
            "error": self.to_string(),
            "code": self.code(),
        }));
        (status, body).into_response()
    }
}
