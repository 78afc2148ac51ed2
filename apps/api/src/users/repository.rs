use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::user::{Role, User};

pub struct NewUser<'a> {
    pub external_id: &'a str,
    pub name: &'a str,
    pub email: &'a str,
    pub role: Role,
}

/// Returns the user for `external_id`, inserting it on first sight.
/// An existing row keeps its stored role and profile.
pub async fn provision_user(pool: &PgPool, new_user: NewUser<'_>) -> sqlx::Result<User> {
    if let Some(user) = find_by_external_id(pool, new_user.external_id).await? {
        return Ok(user);
    }

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, external_id, name, email, role)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (external_id) DO UPDATE SET external_id = EXCLUDED.external_id
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(new_user.external_id)
    .bind(new_user.name)
    .bind(new_user.email)
    .bind(new_user.role.as_str())
    .fetch_one(pool)
    .await?;

    info!("Provisioned {} user {} for subject {}", user.role, user.id, user.external_id);
    Ok(user)
}

/// Inserts a password user. The row id doubles as its token subject.
pub async fn insert_local_user(
    pool: &PgPool,
    name: &str,
    email: &str,
    role: Role,
    password_hash: &str,
) -> sqlx::Result<User> {
    let user_id = Uuid::new_v4();
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, external_id, name, email, role, password_hash)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(user_id.to_string())
    .bind(name)
    .bind(email)
    .bind(role.as_str())
    .bind(password_hash)
    .fetch_one(pool)
    .await
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_external_id(pool: &PgPool, external_id: &str) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE external_id = $1")
        .bind(external_id)
        .fetch_optional(pool)
        .await
}

pub async fn list_users(pool: &PgPool) -> sqlx::Result<Vec<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

/// Applies a partial profile update; `None` keeps the stored value.
pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    name: Option<&str>,
    skills: Option<&[String]>,
) -> sqlx::Result<User> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET name = COALESCE($2, name),
            skills = COALESCE($3, skills)
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(name)
    .bind(skills)
    .fetch_one(pool)
    .await
}

pub async fn set_resume(pool: &PgPool, user_id: Uuid, resume_url: &str) -> sqlx::Result<()> {
    sqlx::query("UPDATE users SET resume = $2 WHERE id = $1")
        .bind(user_id)
        .bind(resume_url)
        .execute(pool)
        .await?;
    Ok(())
}
