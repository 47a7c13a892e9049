use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use super::super::clock::Clock;
use super::super::error::LifecycleError;
use super::super::export;
use super::super::reporting::ApplicationListFilter;
use super::super::router::{require_operator_identity, MarketplaceState};
use super::super::store::{MarketplaceStore, StorageError};
use super::domain::{ApplicationId, ApplicationStatus, IntakeSubmission};

/// `POST /api/v1/applications`: public intake, no identity required.
pub(crate) async fn intake<S, C>(
    State(state): State<MarketplaceState<S, C>>,
    Json(submission): Json<IntakeSubmission>,
) -> Result<impl IntoResponse, LifecycleError>
where
    S: MarketplaceStore + 'static,
    C: Clock + 'static,
{
    let application = state.intake.admit(submission)?;
    let body = json!({
        "success": true,
        "applicationId": application.id,
    });
    Ok((StatusCode::CREATED, Json(body)))
}

pub(crate) async fn dashboard<S, C>(
    State(state): State<MarketplaceState<S, C>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, LifecycleError>
where
    S: MarketplaceStore + 'static,
    C: Clock + 'static,
{
    require_operator_identity(&headers, state.auth.as_ref())?;
    Ok(Json(state.reports.dashboard()?))
}

pub(crate) async fn ops_applications_index<S, C>(
    State(state): State<MarketplaceState<S, C>>,
    headers: HeaderMap,
    Query(filter): Query<ApplicationListFilter>,
) -> Result<impl IntoResponse, LifecycleError>
where
    S: MarketplaceStore + 'static,
    C: Clock + 'static,
{
    require_operator_identity(&headers, state.auth.as_ref())?;
    Ok(Json(state.reports.applications_page(&filter)?))
}

pub(crate) async fn detail<S, C>(
    State(state): State<MarketplaceState<S, C>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, LifecycleError>
where
    S: MarketplaceStore + 'static,
    C: Clock + 'static,
{
    require_operator_identity(&headers, state.auth.as_ref())?;
    Ok(Json(state.reports.application_detail(&ApplicationId(id))?))
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusUpdateRequest {
    pub(crate) status: ApplicationStatus,
}

pub(crate) async fn set_status<S, C>(
    State(state): State<MarketplaceState<S, C>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<StatusUpdateRequest>,
) -> Result<impl IntoResponse, LifecycleError>
where
    S: MarketplaceStore + 'static,
    C: Clock + 'static,
{
    let identity = require_operator_identity(&headers, state.auth.as_ref())?;
    let application =
        state
            .review
            .set_status(Some(&identity), &ApplicationId(id), request.status)?;
    Ok(Json(application))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NoteRequest {
    #[serde(default)]
    pub(crate) note_text: String,
}

pub(crate) async fn append_note<S, C>(
    State(state): State<MarketplaceState<S, C>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<NoteRequest>,
) -> Result<impl IntoResponse, LifecycleError>
where
    S: MarketplaceStore + 'static,
    C: Clock + 'static,
{
    let identity = require_operator_identity(&headers, state.auth.as_ref())?;
    let note = state
        .review
        .append_note(Some(&identity), &ApplicationId(id), &request.note_text)?;
    Ok((StatusCode::CREATED, Json(note)))
}

/// `GET /api/v1/ops/applications/export`: CSV attachment.
pub(crate) async fn export<S, C>(
    State(state): State<MarketplaceState<S, C>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, LifecycleError>
where
    S: MarketplaceStore + 'static,
    C: Clock + 'static,
{
    require_operator_identity(&headers, state.auth.as_ref())?;

    let rows = state.reports.applications_export()?;
    let csv = export::applications_csv(&rows).map_err(|err| {
        tracing::error!(error = %err, "application export failed");
        StorageError::Unavailable("csv rendering failed".to_string())
    })?;
    let filename = export::export_filename(state.clock.now());

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, mime::TEXT_CSV.as_ref().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    ))
}
