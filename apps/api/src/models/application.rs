use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::company::CompanySummary;

/// Recruiter-controlled pipeline stage of an application.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApplicationStatus {
    Applied,
    Shortlisted,
    Interview,
    Selected,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::Shortlisted => "Shortlisted",
            ApplicationStatus::Interview => "Interview",
            ApplicationStatus::Selected => "Selected",
            ApplicationStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "applied" => Ok(ApplicationStatus::Applied),
            "shortlisted" => Ok(ApplicationStatus::Shortlisted),
            "interview" => Ok(ApplicationStatus::Interview),
            "selected" => Ok(ApplicationStatus::Selected),
            "rejected" => Ok(ApplicationStatus::Rejected),
            other => Err(format!("invalid application status '{other}'")),
        }
    }
}

/// Application joined with its job, the job's company and the applicant.
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationDetailRow {
    pub id: Uuid,
    pub status: String,
    pub applied_at: DateTime<Utc>,
    pub job_id: Uuid,
    pub job_title: String,
    pub job_location: String,
    pub job_status: String,
    pub company_id: Uuid,
    pub company_name: String,
    pub company_location: String,
    pub company_website: Option<String>,
    pub recruiter_id: Uuid,
    pub user_id: Uuid,
    pub applicant_name: String,
    pub applicant_email: String,
    pub applicant_resume: Option<String>,
    pub applicant_skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationJobSummary {
    pub id: Uuid,
    pub title: String,
    pub location: String,
    pub status: String,
    pub company: CompanySummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub resume: Option<String>,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    pub id: Uuid,
    pub status: String,
    pub applied_at: DateTime<Utc>,
    pub job: ApplicationJobSummary,
    pub applicant: ApplicantSummary,
}

impl From<ApplicationDetailRow> for ApplicationResponse {
    fn from(row: ApplicationDetailRow) -> Self {
        ApplicationResponse {
            id: row.id,
            status: row.status,
            applied_at: row.applied_at,
            job: ApplicationJobSummary {
                id: row.job_id,
                title: row.job_title,
                location: row.job_location,
                status: row.job_status,
                company: CompanySummary {
                    id: row.company_id,
                    name: row.company_name,
                    location: row.company_location,
                    website: row.company_website,
                },
            },
            applicant: ApplicantSummary {
                id: row.user_id,
                name: row.applicant_name,
                email: row.applicant_email,
                resume: row.applicant_resume,
                skills: row.applicant_skills,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_status_accepts_any_case() {
        assert_eq!(
            "shortlisted".parse::<ApplicationStatus>(),
            Ok(ApplicationStatus::Shortlisted)
        );
        assert_eq!(
            "Selected".parse::<ApplicationStatus>(),
            Ok(ApplicationStatus::Selected)
        );
        assert!("hired".parse::<ApplicationStatus>().is_err());
    }

    #[test]
    fn test_application_status_serializes_capitalized() {
        assert_eq!(
            serde_json::to_value(ApplicationStatus::Interview).unwrap(),
            "Interview"
        );
        assert_eq!(ApplicationStatus::Applied.to_string(), "Applied");
    }
}
