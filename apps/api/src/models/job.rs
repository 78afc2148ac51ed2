use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::company::CompanySummary;

/// Moderation state of a posting. Only approved jobs are listed publicly by default.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Approved,
    Rejected,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Approved => "approved",
            JobStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(JobStatus::Pending),
            "approved" => Ok(JobStatus::Approved),
            "rejected" => Ok(JobStatus::Rejected),
            other => Err(format!(
                "invalid job status '{other}' (expected pending, approved or rejected)"
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub skills_required: Vec<String>,
    pub salary: i64,
    pub company_id: Uuid,
    pub location: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Job joined with its company, as selected by the jobs repository.
#[derive(Debug, Clone, FromRow)]
pub struct JobWithCompanyRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub skills_required: Vec<String>,
    pub salary: i64,
    pub company_id: Uuid,
    pub location: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub company_name: String,
    pub company_location: String,
    pub company_website: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub skills_required: Vec<String>,
    pub salary: i64,
    pub location: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub company: CompanySummary,
}

impl From<JobWithCompanyRow> for JobResponse {
    fn from(row: JobWithCompanyRow) -> Self {
        JobResponse {
            id: row.id,
            title: row.title,
            description: row.description,
            skills_required: row.skills_required,
            salary: row.salary,
            location: row.location,
            status: row.status,
            created_at: row.created_at,
            company: CompanySummary {
                id: row.company_id,
                name: row.company_name,
                location: row.company_location,
                website: row.company_website,
            },
        }
    }
}
