use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::{ensure_owner_or_admin, require_role, AuthUser};
use crate::companies::repository::{self, CompanyFields};
use crate::errors::AppError;
use crate::models::company::{Company, CompanyWithRecruiter};
use crate::models::user::Role;
use crate::state::AppState;

const MANAGERS: &[Role] = &[Role::Recruiter, Role::Admin];

#[derive(Debug, Deserialize)]
pub struct CompanyRequest {
    pub name: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
}

impl CompanyRequest {
    fn name(&self) -> Option<&str> {
        non_blank(self.name.as_deref())
    }

    fn location(&self) -> Option<&str> {
        non_blank(self.location.as_deref())
    }

    fn website(&self) -> Option<&str> {
        non_blank(self.website.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// POST /api/companies
pub async fn handle_create_company(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CompanyRequest>,
) -> Result<(StatusCode, Json<Company>), AppError> {
    require_role(&auth, MANAGERS)?;

    let name = req
        .name()
        .ok_or_else(|| AppError::Validation("name is required".to_string()))?;
    let location = req
        .location()
        .ok_or_else(|| AppError::Validation("location is required".to_string()))?;

    if repository::find_by_recruiter(&state.db, auth.id())
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(
            "Company already exists for this recruiter".to_string(),
        ));
    }

    let company = repository::insert_company(
        &state.db,
        auth.id(),
        CompanyFields {
            name,
            location,
            website: req.website(),
        },
    )
    .await
    .map_err(|e| AppError::conflict_on_unique(e, "Company already exists for this recruiter"))?;

    info!("Recruiter {} created company {}", auth.id(), company.id);
    Ok((StatusCode::CREATED, Json(company)))
}

/// GET /api/companies/my-company
pub async fn handle_my_company(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Company>, AppError> {
    require_role(&auth, MANAGERS)?;

    repository::find_by_recruiter(&state.db, auth.id())
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Company not found".to_string()))
}

/// GET /api/companies (admin)
pub async fn handle_list_companies(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<CompanyWithRecruiter>>, AppError> {
    require_role(&auth, &[Role::Admin])?;
    Ok(Json(repository::list_with_recruiters(&state.db).await?))
}

/// PUT /api/companies/:id
pub async fn handle_update_company(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(company_id): Path<Uuid>,
    Json(req): Json<CompanyRequest>,
) -> Result<Json<Company>, AppError> {
    require_role(&auth, MANAGERS)?;

    let company = repository::find_by_id(&state.db, company_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Company not found".to_string()))?;
    ensure_owner_or_admin(&auth, company.recruiter_id)?;

    let updated = repository::update_company(
        &state.db,
        company_id,
        req.name(),
        req.location(),
        req.website(),
    )
    .await?;

    Ok(Json(updated))
}
