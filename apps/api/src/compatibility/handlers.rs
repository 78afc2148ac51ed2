//! Axum route handlers for compatibility analysis.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::auth::MaybeAuthUser;
use crate::compatibility::scorer::AnalysisResult;
use crate::errors::AppError;
use crate::jobs::repository as jobs;
use crate::state::AppState;

/// POST /api/compatibility
///
/// Body: `{ "requiredSkills": [..], "candidateSkills": [..] }`. A missing field,
/// or one that is not an array of strings, yields the insufficient-data result.
/// So does a missing or unparseable body.
pub async fn handle_analyze(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Json<AnalysisResult> {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            debug!("Scoring request without a usable JSON body: {rejection}");
            Value::Null
        }
    };
    let required = skill_list(body.get("requiredSkills"));
    let candidate = skill_list(body.get("candidateSkills"));

    Json(
        state
            .scorer
            .analyze(required.as_deref(), candidate.as_deref()),
    )
}

/// GET /api/jobs/:id/compatibility
///
/// Scores the caller's profile skills against the job. Anonymous callers have
/// no candidate profile and receive the insufficient-data result; a bad token
/// is still rejected.
pub async fn handle_job_compatibility(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    MaybeAuthUser(auth): MaybeAuthUser,
) -> Result<Json<AnalysisResult>, AppError> {
    let job = jobs::find_job(&state.db, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;

    let candidate = auth.map(|user| user.0.skills);
    Ok(Json(state.scorer.analyze(
        Some(job.skills_required.as_slice()),
        candidate.as_deref(),
    )))
}

fn skill_list(value: Option<&Value>) -> Option<Vec<String>> {
    value?
        .as_array()?
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect()
}
