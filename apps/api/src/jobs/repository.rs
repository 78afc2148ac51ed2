use sqlx::PgPool;
use uuid::Uuid;

use crate::db::like_pattern;
use crate::models::job::{Job, JobStatus, JobWithCompanyRow};

const JOB_WITH_COMPANY: &str = r#"
    SELECT j.id, j.title, j.description, j.skills_required, j.salary, j.company_id,
           j.location, j.status, j.created_at,
           c.name AS company_name, c.location AS company_location, c.website AS company_website
    FROM jobs j
    JOIN companies c ON c.id = j.company_id
"#;

/// Listing filters. Text filters are case-insensitive substring matches.
#[derive(Debug, Clone, PartialEq)]
pub struct JobFilter {
    pub status: JobStatus,
    pub search: Option<String>,
    pub skill: Option<String>,
    pub location: Option<String>,
}

impl Default for JobFilter {
    fn default() -> Self {
        JobFilter {
            status: JobStatus::Approved,
            search: None,
            skill: None,
            location: None,
        }
    }
}

pub struct NewJob<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub skills_required: &'a [String],
    pub salary: i64,
    pub location: &'a str,
    pub company_id: Uuid,
    pub status: JobStatus,
}

pub async fn list_jobs(pool: &PgPool, filter: &JobFilter) -> sqlx::Result<Vec<JobWithCompanyRow>> {
    let sql = format!(
        r#"{JOB_WITH_COMPANY}
        WHERE j.status = $1
          AND ($2::text IS NULL OR j.title ILIKE $2 OR j.description ILIKE $2)
          AND ($3::text IS NULL OR EXISTS (
                SELECT 1 FROM unnest(j.skills_required) AS skill WHERE skill ILIKE $3))
          AND ($4::text IS NULL OR j.location ILIKE $4)
        ORDER BY j.created_at DESC
        "#
    );

    sqlx::query_as::<_, JobWithCompanyRow>(&sql)
        .bind(filter.status.as_str())
        .bind(filter.search.as_deref().map(like_pattern))
        .bind(filter.skill.as_deref().map(like_pattern))
        .bind(filter.location.as_deref().map(like_pattern))
        .fetch_all(pool)
        .await
}

pub async fn find_job(pool: &PgPool, job_id: Uuid) -> sqlx::Result<Option<Job>> {
    sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(pool)
        .await
}

pub async fn find_job_with_company(
    pool: &PgPool,
    job_id: Uuid,
) -> sqlx::Result<Option<JobWithCompanyRow>> {
    let sql = format!("{JOB_WITH_COMPANY} WHERE j.id = $1");
    sqlx::query_as::<_, JobWithCompanyRow>(&sql)
        .bind(job_id)
        .fetch_optional(pool)
        .await
}

/// Jobs of every company owned by `recruiter_id`, newest first.
pub async fn list_for_recruiter(
    pool: &PgPool,
    recruiter_id: Uuid,
) -> sqlx::Result<Vec<JobWithCompanyRow>> {
    let sql = format!("{JOB_WITH_COMPANY} WHERE c.recruiter_id = $1 ORDER BY j.created_at DESC");
    sqlx::query_as::<_, JobWithCompanyRow>(&sql)
        .bind(recruiter_id)
        .fetch_all(pool)
        .await
}

pub async fn insert_job(pool: &PgPool, job: NewJob<'_>) -> sqlx::Result<Uuid> {
    let job_id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO jobs (id, title, description, skills_required, salary, company_id, location, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(job_id)
    .bind(job.title)
    .bind(job.description)
    .bind(job.skills_required)
    .bind(job.salary)
    .bind(job.company_id)
    .bind(job.location)
    .bind(job.status.as_str())
    .execute(pool)
    .await?;
    Ok(job_id)
}

/// Returns false when no job has `job_id`.
pub async fn update_status(pool: &PgPool, job_id: Uuid, status: JobStatus) -> sqlx::Result<bool> {
    let result = sqlx::query("UPDATE jobs SET status = $2 WHERE id = $1")
        .bind(job_id)
        .bind(status.as_str())
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
