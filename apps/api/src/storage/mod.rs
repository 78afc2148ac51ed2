//! Resume storage adapter.
//!
//! Handlers only see `Arc<dyn ResumeStore>`; the backend is chosen at startup
//! from `RESUME_STORAGE` (local disk served by the API, or S3 / MinIO).

mod local;
mod s3;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use uuid::Uuid;

use crate::errors::AppError;

pub use local::{LocalResumeStore, LOCAL_RESUME_ROUTE};
pub use s3::S3ResumeStore;

pub const MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// Stores `bytes` under `key` and returns the public URL of the object.
    async fn put(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<String, AppError>;
}

/// Rejects anything that is not a PDF of at most `MAX_RESUME_BYTES`.
pub fn validate_resume(
    file_name: Option<&str>,
    content_type: Option<&str>,
    size: usize,
) -> Result<(), AppError> {
    let is_pdf_type = content_type
        .map(|ct| ct.trim().eq_ignore_ascii_case(PDF_CONTENT_TYPE))
        .unwrap_or(false);
    let is_pdf_name = file_name
        .map(|name| name.to_lowercase().ends_with(".pdf"))
        .unwrap_or(false);

    if !is_pdf_type && !is_pdf_name {
        return Err(AppError::Validation(
            "Only PDF files are allowed!".to_string(),
        ));
    }
    if size == 0 {
        return Err(AppError::Validation("No file uploaded".to_string()));
    }
    if size > MAX_RESUME_BYTES {
        return Err(AppError::PayloadTooLarge(format!(
            "Resume exceeds the {} MB limit",
            MAX_RESUME_BYTES / (1024 * 1024)
        )));
    }
    Ok(())
}

/// Unique object key: `resume-{unix_millis}-{random}.pdf`.
pub fn resume_key() -> String {
    format!(
        "resume-{}-{}.pdf",
        Utc::now().timestamp_millis(),
        Uuid::new_v4().simple()
    )
}
