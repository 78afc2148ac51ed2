use sqlx::PgPool;
use uuid::Uuid;

use crate::models::application::{ApplicationDetailRow, ApplicationStatus};

const APPLICATION_DETAIL: &str = r#"
    SELECT a.id, a.status, a.applied_at,
           j.id AS job_id, j.title AS job_title, j.location AS job_location, j.status AS job_status,
           c.id AS company_id, c.name AS company_name, c.location AS company_location,
           c.website AS company_website, c.recruiter_id,
           u.id AS user_id, u.name AS applicant_name, u.email AS applicant_email,
           u.resume AS applicant_resume, u.skills AS applicant_skills
    FROM applications a
    JOIN jobs j ON j.id = a.job_id
    JOIN companies c ON c.id = j.company_id
    JOIN users u ON u.id = a.user_id
"#;

pub async fn has_applied(pool: &PgPool, job_id: Uuid, user_id: Uuid) -> sqlx::Result<bool> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM applications WHERE job_id = $1 AND user_id = $2)",
    )
    .bind(job_id)
    .bind(user_id)
    .fetch_one(pool)
    .await
}

pub async fn insert_application(pool: &PgPool, job_id: Uuid, user_id: Uuid) -> sqlx::Result<Uuid> {
    let application_id = Uuid::new_v4();
    sqlx::query("INSERT INTO applications (id, job_id, user_id, status) VALUES ($1, $2, $3, $4)")
        .bind(application_id)
        .bind(job_id)
        .bind(user_id)
        .bind(ApplicationStatus::Applied.as_str())
        .execute(pool)
        .await?;
    Ok(application_id)
}

pub async fn find_detail(
    pool: &PgPool,
    application_id: Uuid,
) -> sqlx::Result<Option<ApplicationDetailRow>> {
    let sql = format!("{APPLICATION_DETAIL} WHERE a.id = $1");
    sqlx::query_as::<_, ApplicationDetailRow>(&sql)
        .bind(application_id)
        .fetch_optional(pool)
        .await
}

pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> sqlx::Result<Vec<ApplicationDetailRow>> {
    let sql = format!("{APPLICATION_DETAIL} WHERE a.user_id = $1 ORDER BY a.applied_at DESC");
    sqlx::query_as::<_, ApplicationDetailRow>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await
}

pub async fn list_for_job(pool: &PgPool, job_id: Uuid) -> sqlx::Result<Vec<ApplicationDetailRow>> {
    let sql = format!("{APPLICATION_DETAIL} WHERE a.job_id = $1 ORDER BY a.applied_at DESC");
    sqlx::query_as::<_, ApplicationDetailRow>(&sql)
        .bind(job_id)
        .fetch_all(pool)
        .await
}

pub async fn update_status(
    pool: &PgPool,
    application_id: Uuid,
    status: ApplicationStatus,
) -> sqlx::Result<()> {
    sqlx::query("UPDATE applications SET status = $2 WHERE id = $1")
        .bind(application_id)
        .bind(status.as_str())
        .execute(pool)
        .await?;
    Ok(())
}
