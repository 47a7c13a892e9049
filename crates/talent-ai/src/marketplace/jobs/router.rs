use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use super::super::clock::Clock;
use super::super::error::LifecycleError;
use super::super::reporting::JobListFilter;
use super::super::router::{require_operator_identity, MarketplaceState};
use super::super::store::MarketplaceStore;
use super::domain::{JobDraft, JobId};

/// `GET /api/v1/jobs`: published cards for the public listing page.
pub(crate) async fn public_jobs<S, C>(
    State(state): State<MarketplaceState<S, C>>,
) -> Result<impl IntoResponse, LifecycleError>
where
    S: MarketplaceStore + 'static,
    C: Clock + 'static,
{
    Ok(Json(state.reports.published_jobs()?))
}

/// `GET /api/v1/jobs/:slug`: full detail, 404 unless published.
pub(crate) async fn public_job_detail<S, C>(
    State(state): State<MarketplaceState<S, C>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, LifecycleError>
where
    S: MarketplaceStore + 'static,
    C: Clock + 'static,
{
    Ok(Json(state.reports.published_job_detail(&slug)?))
}

pub(crate) async fn ops_jobs_index<S, C>(
    State(state): State<MarketplaceState<S, C>>,
    headers: HeaderMap,
    Query(filter): Query<JobListFilter>,
) -> Result<impl IntoResponse, LifecycleError>
where
    S: MarketplaceStore + 'static,
    C: Clock + 'static,
{
    require_operator_identity(&headers, state.auth.as_ref())?;
    Ok(Json(state.reports.jobs_page(&filter)?))
}

pub(crate) async fn job_options<S, C>(
    State(state): State<MarketplaceState<S, C>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, LifecycleError>
where
    S: MarketplaceStore + 'static,
    C: Clock + 'static,
{
    require_operator_identity(&headers, state.auth.as_ref())?;
    Ok(Json(state.reports.job_filter_options()?))
}

pub(crate) async fn create_job<S, C>(
    State(state): State<MarketplaceState<S, C>>,
    headers: HeaderMap,
    Json(draft): Json<JobDraft>,
) -> Result<impl IntoResponse, LifecycleError>
where
    S: MarketplaceStore + 'static,
    C: Clock + 'static,
{
    let identity = require_operator_identity(&headers, state.auth.as_ref())?;
    let job = state.jobs.create(Some(&identity), draft)?;
    Ok((StatusCode::CREATED, Json(job)))
}

pub(crate) async fn update_job<S, C>(
    State(state): State<MarketplaceState<S, C>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(draft): Json<JobDraft>,
) -> Result<impl IntoResponse, LifecycleError>
where
    S: MarketplaceStore + 'static,
    C: Clock + 'static,
{
    let identity = require_operator_identity(&headers, state.auth.as_ref())?;
    let job = state.jobs.update(Some(&identity), &JobId(id), draft)?;
    Ok(Json(job))
}

pub(crate) async fn delete_job<S, C>(
    State(state): State<MarketplaceState<S, C>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, LifecycleError>
where
    S: MarketplaceStore + 'static,
    C: Clock + 'static,
{
    let identity = require_operator_identity(&headers, state.auth.as_ref())?;
    state.jobs.delete(Some(&identity), &JobId(id))?;
    Ok(StatusCode::NO_CONTENT)
}
