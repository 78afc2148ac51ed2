use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::{hash_password, issue_token, require_role, verify_password, AuthUser};
use crate::errors::AppError;
use crate::models::user::{Role, User};
use crate::state::AppState;
use crate::storage::{resume_key, validate_resume, PDF_CONTENT_TYPE};
use crate::users::repository;

const RESUME_FIELD: &str = "resume";
const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<String>,
}

impl RegisterRequest {
    /// Returns the role to register with. Admins cannot self-register.
    fn validate(&self) -> Result<Role, AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("name cannot be empty".to_string()));
        }
        if !is_plausible_email(&self.email) {
            return Err(AppError::Validation("email is invalid".to_string()));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::Validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        let role = match self.role.as_deref().map(str::trim) {
            None | Some("") => Role::Jobseeker,
            Some(raw) => raw.parse::<Role>().map_err(AppError::Validation)?,
        };
        if role == Role::Admin {
            return Err(AppError::Validation(
                "role must be jobseeker or recruiter".to_string(),
            ));
        }
        Ok(role)
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub skills: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub message: String,
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct ResumeUploadResponse {
    pub message: String,
    pub resume: String,
}

/// POST /api/auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let role = req.validate()?;
    let password_hash = hash_password(&req.password)?;

    let user = repository::insert_local_user(
        &state.db,
        req.name.trim(),
        req.email.trim(),
        role,
        &password_hash,
    )
    .await
    .map_err(|e| AppError::conflict_on_unique(e, "User already exists"))?;

    info!("Registered {} user {}", user.role, user.id);
    let token = issue_token(&user, &state.config.jwt_secret)?;
    Ok((StatusCode::CREATED, Json(AuthResponse { token, user })))
}

/// POST /api/auth/login
///
/// Unknown emails, wrong passwords and accounts without a password all yield 401.
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let user = repository::find_by_email(&state.db, req.email.trim())
        .await?
        .ok_or(AppError::Unauthorized)?;

    let verified = user
        .password_hash
        .as_deref()
        .is_some_and(|hash| verify_password(&req.password, hash));
    if !verified {
        warn!("Failed login for user {}", user.id);
        return Err(AppError::Unauthorized);
    }

    let token = issue_token(&user, &state.config.jwt_secret)?;
    Ok(Json(AuthResponse { token, user }))
}

/// GET /api/auth/me
pub async fn handle_me(auth: AuthUser) -> Json<User> {
    Json(auth.0)
}

/// PUT /api/users/profile
pub async fn handle_update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    let name = req
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());
    let skills = req.skills.as_deref().map(clean_skills);

    let user = repository::update_profile(&state.db, auth.id(), name, skills.as_deref()).await?;
    info!("Updated profile of user {}", user.id);

    Ok(Json(ProfileResponse {
        message: "Profile updated successfully".to_string(),
        user,
    }))
}

/// POST /api/users/upload-resume (multipart field `resume`)
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<ResumeUploadResponse>, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map_err(multipart_error)?;

        validate_resume(file_name.as_deref(), content_type.as_deref(), data.len())?;

        let url = state
            .resume_store
            .put(&resume_key(), data, PDF_CONTENT_TYPE)
            .await?;
        repository::set_resume(&state.db, auth.id(), &url).await?;

        info!("User {} uploaded resume {url}", auth.id());
        return Ok(Json(ResumeUploadResponse {
            message: "Resume uploaded successfully".to_string(),
            resume: url,
        }));
    }

    Err(AppError::Validation("No file uploaded".to_string()))
}

/// GET /api/users (admin)
pub async fn handle_list_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<User>>, AppError> {
    require_role(&auth, &[Role::Admin])?;
    Ok(Json(repository::list_users(&state.db).await?))
}

fn is_plausible_email(email: &str) -> bool {
    match email.trim().split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.contains('@'),
        None => false,
    }
}

/// Trims entries and drops blanks, keeping the caller's order.
fn clean_skills(skills: &[String]) -> Vec<String> {
    skills
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn multipart_error(e: axum::extract::multipart::MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("Resume exceeds the upload limit".to_string())
    } else {
        AppError::Validation(format!("Invalid multipart body: {}", e.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_register(role: Option<&str>) -> RegisterRequest {
        RegisterRequest {
            name: "Jane Jobseeker".to_string(),
            email: "jane@example.com".to_string(),
            password: "password123".to_string(),
            role: role.map(str::to_string),
        }
    }

    #[test]
    fn test_register_role_defaults_to_jobseeker() {
        assert_eq!(make_register(None).validate().unwrap(), Role::Jobseeker);
        assert_eq!(make_register(Some("")).validate().unwrap(), Role::Jobseeker);
        assert_eq!(
            make_register(Some("recruiter")).validate().unwrap(),
            Role::Recruiter
        );
    }

    #[test]
    fn test_register_rejects_admin_and_unknown_roles() {
        assert!(matches!(
            make_register(Some("admin")).validate(),
            Err(AppError::Validation(_))
        ));
        assert!(make_register(Some("owner")).validate().is_err());
    }

    #[test]
    fn test_register_rejects_bad_fields() {
        let mut short = make_register(None);
        short.password = "12345".to_string();
        assert!(short.validate().is_err());

        let mut blank = make_register(None);
        blank.name = "  ".to_string();
        assert!(blank.validate().is_err());

        for email in ["jane", "@example.com", "jane@localhost", "a@b@c.com"] {
            let mut req = make_register(None);
            req.email = email.to_string();
            assert!(req.validate().is_err(), "{email}");
        }
    }

    #[test]
    fn test_clean_skills_trims_and_drops_blanks() {
        let raw = vec![
            " React ".to_string(),
            "".to_string(),
            "   ".to_string(),
            "Node.js".to_string(),
        ];
        assert_eq!(clean_skills(&raw), vec!["React", "Node.js"]);
    }
}
