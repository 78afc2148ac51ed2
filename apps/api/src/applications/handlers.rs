use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::applications::repository;
use crate::auth::{ensure_owner_or_admin, require_role, AuthUser};
use crate::companies::repository as companies;
use crate::errors::AppError;
use crate::jobs::repository as jobs;
use crate::models::application::{ApplicationResponse, ApplicationStatus};
use crate::models::user::Role;
use crate::state::AppState;

const REVIEWERS: &[Role] = &[Role::Recruiter, Role::Admin];

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

/// POST /api/applications/:job_id (jobseeker)
pub async fn handle_apply(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(job_id): Path<Uuid>,
) -> Result<(StatusCode, Json<ApplicationResponse>), AppError> {
    require_role(&auth, &[Role::Jobseeker])?;

    let job_found = jobs::find_job(&state.db, job_id).await?.is_some();
    let already_applied =
        job_found && repository::has_applied(&state.db, job_id, auth.id()).await?;
    ensure_can_apply(job_found, already_applied, auth.0.resume.is_some())?;

    let application_id = repository::insert_application(&state.db, job_id, auth.id())
        .await
        .map_err(|e| AppError::conflict_on_unique(e, "Already applied for this job"))?;

    info!("User {} applied to job {job_id}", auth.id());
    let application = load_application(&state, application_id).await?;
    Ok((StatusCode::CREATED, Json(application)))
}

/// GET /api/applications/user/my-applications (jobseeker)
pub async fn handle_my_applications(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<ApplicationResponse>>, AppError> {
    require_role(&auth, &[Role::Jobseeker])?;
    let rows = repository::list_for_user(&state.db, auth.id()).await?;
    Ok(Json(rows.into_iter().map(ApplicationResponse::from).collect()))
}

/// GET /api/applications/job/:job_id (owning recruiter or admin)
pub async fn handle_job_applications(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(job_id): Path<Uuid>,
) -> Result<Json<Vec<ApplicationResponse>>, AppError> {
    require_role(&auth, REVIEWERS)?;

    let job = jobs::find_job(&state.db, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;
    let company = companies::find_by_id(&state.db, job.company_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Company not found".to_string()))?;
    ensure_owner_or_admin(&auth, company.recruiter_id)?;

    let rows = repository::list_for_job(&state.db, job_id).await?;
    Ok(Json(rows.into_iter().map(ApplicationResponse::from).collect()))
}

/// PUT /api/applications/:id/status (owning recruiter or admin)
pub async fn handle_update_application_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(application_id): Path<Uuid>,
    Json(req): Json<StatusRequest>,
) -> Result<Json<ApplicationResponse>, AppError> {
    require_role(&auth, REVIEWERS)?;
    let status = req
        .status
        .parse::<ApplicationStatus>()
        .map_err(AppError::Validation)?;

    let existing = repository::find_detail(&state.db, application_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;
    ensure_owner_or_admin(&auth, existing.recruiter_id)?;

    repository::update_status(&state.db, application_id, status).await?;
    info!(
        "User {} moved application {application_id} to {status}",
        auth.id()
    );

    load_application(&state, application_id).await.map(Json)
}

/// Apply preconditions, checked in order: job exists, not yet applied, resume on file.
fn ensure_can_apply(job_found: bool, already_applied: bool, has_resume: bool) -> Result<(), AppError> {
    if !job_found {
        return Err(AppError::NotFound("Job not found".to_string()));
    }
    if already_applied {
        return Err(AppError::Conflict("Already applied for this job".to_string()));
    }
    if !has_resume {
        return Err(AppError::Validation(
            "Please upload your resume first".to_string(),
        ));
    }
    Ok(())
}

async fn load_application(
    state: &AppState,
    application_id: Uuid,
) -> Result<ApplicationResponse, AppError> {
    repository::find_detail(&state.db, application_id)
        .await?
        .map(ApplicationResponse::from)
        .ok_or_else(|| AppError::NotFound("Application not found".to_string()))
}
