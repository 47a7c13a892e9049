use std::sync::Arc;

use axum::http::{header, HeaderMap};
use axum::routing::{get, patch, post};
use axum::Router;

use super::applications::intake::ApplicationIntake;
use super::applications::review::ApplicationReviewService;
use super::applications::router as applications_router;
use super::auth::{AuthGateway, OperatorDirectory, OperatorIdentity};
use super::clock::Clock;
use super::error::{LifecycleError, UnauthorizedError};
use super::jobs::router as jobs_router;
use super::jobs::service::JobLifecycleService;
use super::reporting::ReportService;
use super::store::MarketplaceStore;

/// Shared handler state: every lifecycle service plus the auth gateway.
pub struct MarketplaceState<S, C> {
    pub jobs: Arc<JobLifecycleService<S, C>>,
    pub intake: Arc<ApplicationIntake<S, C>>,
    pub review: Arc<ApplicationReviewService<S, C>>,
    pub reports: Arc<ReportService<S, C>>,
    pub clock: Arc<C>,
    pub auth: Arc<dyn AuthGateway>,
}

impl<S, C> Clone for MarketplaceState<S, C> {
    fn clone(&self) -> Self {
        Self {
            jobs: self.jobs.clone(),
            intake: self.intake.clone(),
            review: self.review.clone(),
            reports: self.reports.clone(),
            clock: self.clock.clone(),
            auth: self.auth.clone(),
        }
    }
}

impl<S, C> MarketplaceState<S, C>
where
    S: MarketplaceStore + 'static,
    C: Clock + 'static,
{
    pub fn new(
        store: Arc<S>,
        clock: Arc<C>,
        auth: Arc<dyn AuthGateway>,
        directory: Arc<dyn OperatorDirectory>,
    ) -> Self {
        Self {
            jobs: Arc::new(JobLifecycleService::new(store.clone(), clock.clone())),
            intake: Arc::new(ApplicationIntake::new(store.clone(), clock.clone())),
            review: Arc::new(ApplicationReviewService::new(store.clone(), clock.clone())),
            reports: Arc::new(ReportService::new(store, clock.clone(), directory)),
            clock,
            auth,
        }
    }
}

/// Resolves the bearer credential on a console request, rejecting requests
/// without a roster match.
pub(crate) fn require_operator_identity(
    headers: &HeaderMap,
    auth: &dyn AuthGateway,
) -> Result<OperatorIdentity, LifecycleError> {
    let identity = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .and_then(|token| auth.authenticate(token.trim()));
    identity.ok_or_else(|| UnauthorizedError.into())
}

/// Assembles the public intake/listing surface and the operations console
/// under `/api/v1`.
pub fn marketplace_router<S, C>(state: MarketplaceState<S, C>) -> Router
where
    S: MarketplaceStore + 'static,
    C: Clock + 'static,
{
    Router::new()
        .route("/api/v1/jobs", get(jobs_router::public_jobs::<S, C>))
        .route(
            "/api/v1/jobs/:slug",
            get(jobs_router::public_job_detail::<S, C>),
        )
        .route(
            "/api/v1/applications",
            post(applications_router::intake::<S, C>),
        )
        .route(
            "/api/v1/ops/dashboard",
            get(applications_router::dashboard::<S, C>),
        )
        .route(
            "/api/v1/ops/jobs",
            get(jobs_router::ops_jobs_index::<S, C>).post(jobs_router::create_job::<S, C>),
        )
        .route(
            "/api/v1/ops/jobs/options",
            get(jobs_router::job_options::<S, C>),
        )
        .route(
            "/api/v1/ops/jobs/:id",
            patch(jobs_router::update_job::<S, C>).delete(jobs_router::delete_job::<S, C>),
        )
        .route(
            "/api/v1/ops/applications",
            get(applications_router::ops_applications_index::<S, C>),
        )
        .route(
            "/api/v1/ops/applications/export",
            get(applications_router::export::<S, C>),
        )
        .route(
            "/api/v1/ops/applications/:id",
            get(applications_router::detail::<S, C>),
        )
        .route(
            "/api/v1/ops/applications/:id/status",
            patch(applications_router::set_status::<S, C>),
        )
        .route(
            "/api/v1/ops/applications/:id/notes",
            post(applications_router::append_note::<S, C>),
        )
        .with_state(state)
}
