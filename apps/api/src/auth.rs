//! Bearer-token identity, password credentials and role checks.
//!
//! Tokens are HS256 JWTs signed with `JWT_SECRET`, issued by `/api/auth/login` and
//! `/api/auth/register` or by an identity provider sharing the secret. A user row
//! is provisioned from the token claims the first time an external subject is seen.

use anyhow::anyhow;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::{Role, User};
use crate::state::AppState;
use crate::users::repository::{provision_user, NewUser};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Identity-provider subject, stored as `users.external_id`.
    pub sub: String,
    pub email: String,
    pub name: Option<String>,
    pub role: Option<String>,
    pub exp: usize,
}

impl Claims {
    /// Role requested by the token for first-time provisioning. Defaults to jobseeker.
    pub fn requested_role(&self) -> Result<Role, AppError> {
        match self.role.as_deref() {
            None => Ok(Role::Jobseeker),
            Some(raw) => raw.parse().map_err(|e: String| {
                warn!("Rejected token with {e}");
                AppError::Unauthorized
            }),
        }
    }

    fn display_name(&self) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self
                .email
                .split('@')
                .next()
                .unwrap_or(&self.email)
                .to_string(),
        }
    }
}

/// Lifetime of tokens issued by this API.
const TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Signs a token whose subject is the user's `external_id`.
pub fn issue_token(user: &User, secret: &str) -> Result<String, AppError> {
    let claims = Claims {
        sub: user.external_id.clone(),
        email: user.email.clone(),
        name: Some(user.name.clone()),
        role: Some(user.role.clone()),
        exp: (Utc::now().timestamp() + TOKEN_TTL_SECS) as usize,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow!("Failed to sign token: {e}")))
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow!("Failed to hash password: {e}")))
}

/// False for a wrong password or an unparseable stored hash.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            warn!("Stored password hash is invalid: {e}");
            false
        }
    }
}

pub fn decode_claims(token: &str, secret: &str) -> Result<Claims, AppError> {
    let validation = Validation::new(Algorithm::HS256);
    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|e| {
            warn!("Invalid bearer token: {e}");
            AppError::Unauthorized
        })
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// The authenticated caller. Use `MaybeAuthUser` for endpoints open to anonymous users.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl AuthUser {
    pub fn id(&self) -> Uuid {
        self.0.id
    }

    pub fn role(&self) -> Role {
        self.0.role()
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(AppError::Unauthorized)?;
        let claims = decode_claims(token, &state.config.jwt_secret)?;
        let role = claims.requested_role()?;

        let user = provision_user(
            &state.db,
            NewUser {
                external_id: &claims.sub,
                name: &claims.display_name(),
                email: &claims.email,
                role,
            },
        )
        .await
        .map_err(|e| AppError::conflict_on_unique(e, "Email is already registered"))?;

        Ok(AuthUser(user))
    }
}

/// Caller identity for endpoints that also serve anonymous requests.
///
/// No `Authorization` header means anonymous. A header that is present but
/// invalid is rejected, and database failures surface as errors.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

#[async_trait]
impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(AUTHORIZATION) {
            return Ok(MaybeAuthUser(None));
        }
        AuthUser::from_request_parts(parts, state)
            .await
            .map(|user| MaybeAuthUser(Some(user)))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Authorization predicate
// ────────────────────────────────────────────────────────────────────────────

pub fn require_role(user: &AuthUser, allowed: &[Role]) -> Result<(), AppError> {
    if allowed.contains(&user.role()) {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

pub fn ensure_owner_or_admin(user: &AuthUser, owner_id: Uuid) -> Result<(), AppError> {
    if user.id() == owner_id || user.role() == Role::Admin {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}
