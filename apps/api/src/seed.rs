use anyhow::Result;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::info;
use uuid::Uuid;

use crate::auth::hash_password;
use crate::models::application::ApplicationStatus;
use crate::models::job::JobStatus;
use crate::models::user::Role;

struct SeedJob {
    title: &'static str,
    description: &'static str,
    skills: &'static [&'static str],
    salary: i64,
    location: &'static str,
    status: JobStatus,
}

const SEED_PASSWORD: &str = "password123";

const SEED_JOBS: &[SeedJob] = &[
    SeedJob {
        title: "Senior React Developer",
        description: "We are looking for an experienced React developer to join our team.",
        skills: &["React", "JavaScript", "CSS"],
        salary: 120_000,
        location: "Remote",
        status: JobStatus::Approved,
    },
    SeedJob {
        title: "Backend Engineer (Node.js)",
        description: "Join our backend team to build scalable APIs.",
        skills: &["Node.js", "Express", "MongoDB"],
        salary: 115_000,
        location: "San Francisco, CA",
        status: JobStatus::Approved,
    },
    SeedJob {
        title: "Junior Web Developer",
        description: "Great opportunity for fresh graduates.",
        skills: &["HTML", "CSS", "JavaScript"],
        salary: 70_000,
        location: "New York, NY",
        status: JobStatus::Pending,
    },
];

/// Replaces all data with the demo dataset. Runs in a single transaction.
pub async fn seed_demo_data(pool: &PgPool) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("TRUNCATE applications, jobs, companies, users")
        .execute(&mut *tx)
        .await?;
    info!("Cleared existing data");

    let password_hash = hash_password(SEED_PASSWORD)?;
    insert_user(
        &mut tx,
        "seed-admin",
        "Admin User",
        "admin@example.com",
        Role::Admin,
        &[],
        &password_hash,
    )
    .await?;
    let recruiter_id = insert_user(
        &mut tx,
        "seed-recruiter",
        "John Recruiter",
        "recruiter@example.com",
        Role::Recruiter,
        &[],
        &password_hash,
    )
    .await?;
    let jobseeker_id = insert_user(
        &mut tx,
        "seed-jobseeker",
        "Jane Jobseeker",
        "jane@example.com",
        Role::Jobseeker,
        &["JavaScript", "React", "Node.js"],
        &password_hash,
    )
    .await?;

    let company_id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO companies (id, name, location, website, recruiter_id) VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(company_id)
    .bind("Tech Innovators Inc.")
    .bind("San Francisco, CA")
    .bind("https://techinnovators.com")
    .bind(recruiter_id)
    .execute(&mut *tx)
    .await?;

    let mut job_ids = Vec::with_capacity(SEED_JOBS.len());
    for job in SEED_JOBS {
        let job_id = Uuid::new_v4();
        let skills: Vec<String> = job.skills.iter().map(|s| s.to_string()).collect();
        sqlx::query(
            r#"
            INSERT INTO jobs (id, title, description, skills_required, salary, company_id, location, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(job_id)
        .bind(job.title)
        .bind(job.description)
        .bind(&skills)
        .bind(job.salary)
        .bind(company_id)
        .bind(job.location)
        .bind(job.status.as_str())
        .execute(&mut *tx)
        .await?;
        job_ids.push(job_id);
    }

    sqlx::query("INSERT INTO applications (id, job_id, user_id, status) VALUES ($1, $2, $3, $4)")
        .bind(Uuid::new_v4())
        .bind(job_ids[0])
        .bind(jobseeker_id)
        .bind(ApplicationStatus::Applied.as_str())
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    info!(
        "Seeded 3 users, 1 company, {} jobs and 1 application",
        job_ids.len()
    );
    Ok(())
}

async fn insert_user(
    tx: &mut Transaction<'_, Postgres>,
    external_id: &str,
    name: &str,
    email: &str,
    role: Role,
    skills: &[&str],
    password_hash: &str,
) -> Result<Uuid> {
    let user_id = Uuid::new_v4();
    let skills: Vec<String> = skills.iter().map(|s| s.to_string()).collect();
    sqlx::query(
        r#"
        INSERT INTO users (id, external_id, name, email, role, skills, password_hash)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(user_id)
    .bind(external_id)
    .bind(name)
    .bind(email)
    .bind(role.as_str())
    .bind(&skills)
    .bind(password_hash)
    .execute(&mut **tx)
    .await?;
    Ok(user_id)
}
