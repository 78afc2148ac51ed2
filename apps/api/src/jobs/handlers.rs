use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::{ensure_owner_or_admin, require_role, AuthUser};
use crate::companies::repository as companies;
use crate::errors::AppError;
use crate::jobs::repository::{self, JobFilter, NewJob};
use crate::models::job::{JobResponse, JobStatus};
use crate::models::user::Role;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct JobQuery {
    pub search: Option<String>,
    pub skill: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
}

impl JobQuery {
    /// Blank parameters are ignored; status defaults to approved.
    pub fn into_filter(self) -> Result<JobFilter, AppError> {
        let status = match non_blank(self.status) {
            Some(raw) => raw.parse::<JobStatus>().map_err(AppError::Validation)?,
            None => JobStatus::Approved,
        };

        Ok(JobFilter {
            status,
            search: non_blank(self.search),
            skill: non_blank(self.skill),
            location: non_blank(self.location),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    pub title: String,
    pub description: String,
    pub skills_required: Option<Vec<String>>,
    pub salary: i64,
    pub location: String,
    pub company_id: Uuid,
}

impl CreateJobRequest {
    fn validate(&self) -> Result<(), AppError> {
        for (field, value) in [
            ("title", &self.title),
            ("description", &self.description),
            ("location", &self.location),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!("{field} cannot be empty")));
            }
        }
        if self.salary < 0 {
            return Err(AppError::Validation("salary cannot be negative".to_string()));
        }
        Ok(())
    }

    fn skills(&self) -> Vec<String> {
        self.skills_required
            .iter()
            .flatten()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

/// GET /api/jobs?search=&skill=&location=&status=
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobQuery>,
) -> Result<Json<Vec<JobResponse>>, AppError> {
    let filter = query.into_filter()?;
    let jobs = repository::list_jobs(&state.db, &filter).await?;
    Ok(Json(jobs.into_iter().map(JobResponse::from).collect()))
}

/// GET /api/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<JobResponse>, AppError> {
    load_job_response(&state, job_id).await.map(Json)
}

/// POST /api/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<JobResponse>), AppError> {
    require_role(&auth, &[Role::Recruiter, Role::Admin])?;
    req.validate()?;

    let company = companies::find_by_id(&state.db, req.company_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Company not found".to_string()))?;
    ensure_owner_or_admin(&auth, company.recruiter_id)?;

    // Admin postings skip moderation.
    let status = if auth.role() == Role::Admin {
        JobStatus::Approved
    } else {
        JobStatus::Pending
    };

    let skills = req.skills();
    let job_id = repository::insert_job(
        &state.db,
        NewJob {
            title: req.title.trim(),
            description: &req.description,
            skills_required: &skills,
            salary: req.salary,
            location: req.location.trim(),
            company_id: company.id,
            status,
        },
    )
    .await?;

    info!("User {} posted job {job_id} ({status})", auth.id());
    let job = load_job_response(&state, job_id).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// PUT /api/jobs/:id/status (admin)
pub async fn handle_update_job_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(job_id): Path<Uuid>,
    Json(req): Json<StatusRequest>,
) -> Result<Json<JobResponse>, AppError> {
    require_role(&auth, &[Role::Admin])?;
    let status = req
        .status
        .parse::<JobStatus>()
        .map_err(AppError::Validation)?;

    if !repository::update_status(&state.db, job_id, status).await? {
        return Err(AppError::NotFound("Job not found".to_string()));
    }

    info!("Admin {} set job {job_id} to {status}", auth.id());
    load_job_response(&state, job_id).await.map(Json)
}

/// GET /api/jobs/recruiter/my-jobs
pub async fn handle_my_jobs(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<JobResponse>>, AppError> {
    require_role(&auth, &[Role::Recruiter, Role::Admin])?;
    let jobs = repository::list_for_recruiter(&state.db, auth.id()).await?;
    Ok(Json(jobs.into_iter().map(JobResponse::from).collect()))
}

async fn load_job_response(state: &AppState, job_id: Uuid) -> Result<JobResponse, AppError> {
    repository::find_job_with_company(&state.db, job_id)
        .await?
        .map(JobResponse::from)
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))
}
