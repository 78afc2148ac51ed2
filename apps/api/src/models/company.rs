use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub website: Option<String>,
    pub recruiter_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Company fields embedded in job and application responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySummary {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub website: Option<String>,
}

/// Admin listing row: company plus the owning recruiter's contact.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CompanyWithRecruiter {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub website: Option<String>,
    pub recruiter_id: Uuid,
    pub recruiter_name: String,
    pub recruiter_email: String,
    pub created_at: DateTime<Utc>,
}
