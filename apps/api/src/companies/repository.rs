use sqlx::PgPool;
use uuid::Uuid;

use crate::models::company::{Company, CompanyWithRecruiter};

pub struct CompanyFields<'a> {
    pub name: &'a str,
    pub location: &'a str,
    pub website: Option<&'a str>,
}

pub async fn insert_company(
    pool: &PgPool,
    recruiter_id: Uuid,
    fields: CompanyFields<'_>,
) -> sqlx::Result<Company> {
    sqlx::query_as::<_, Company>(
        r#"
        INSERT INTO companies (id, name, location, website, recruiter_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(fields.name)
    .bind(fields.location)
    .bind(fields.website)
    .bind(recruiter_id)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, company_id: Uuid) -> sqlx::Result<Option<Company>> {
    sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
        .bind(company_id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_recruiter(pool: &PgPool, recruiter_id: Uuid) -> sqlx::Result<Option<Company>> {
    sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE recruiter_id = $1")
        .bind(recruiter_id)
        .fetch_optional(pool)
        .await
}

pub async fn list_with_recruiters(pool: &PgPool) -> sqlx::Result<Vec<CompanyWithRecruiter>> {
    sqlx::query_as::<_, CompanyWithRecruiter>(
        r#"
        SELECT c.id, c.name, c.location, c.website, c.recruiter_id, c.created_at,
               u.name AS recruiter_name, u.email AS recruiter_email
        FROM companies c
        JOIN users u ON u.id = c.recruiter_id
        ORDER BY c.created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Partial update; `None` keeps the stored value.
pub async fn update_company(
    pool: &PgPool,
    company_id: Uuid,
    name: Option<&str>,
    location: Option<&str>,
    website: Option<&str>,
) -> sqlx::Result<Company> {
    sqlx::query_as::<_, Company>(
        r#"
        UPDATE companies
        SET name = COALESCE($2, name),
            location = COALESCE($3, location),
            website = COALESCE($4, website)
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(company_id)
    .bind(name)
    .bind(location)
    .bind(website)
    .fetch_one(pool)
    .await
}
