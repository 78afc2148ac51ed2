use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;
use bytes::Bytes;
use tracing::info;

use crate::errors::AppError;
use crate::storage::ResumeStore;

/// URL path under which the router serves locally stored resumes.
pub const LOCAL_RESUME_ROUTE: &str = "/uploads/resumes";

pub struct LocalResumeStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalResumeStore {
    /// Creates the upload directory if needed.
    pub async fn new(root: impl Into<PathBuf>, public_base_url: &str) -> anyhow::Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .with_context(|| format!("Failed to create upload directory {}", root.display()))?;

        Ok(LocalResumeStore {
            root,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ResumeStore for LocalResumeStore {
    async fn put(&self, key: &str, bytes: Bytes, _content_type: &str) -> Result<String, AppError> {
        if key.contains('/') || key.contains('\\') || key.starts_with('.') {
            return Err(AppError::Validation(format!("Invalid object key '{key}'")));
        }

        let path = self.root.join(key);
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| AppError::Storage(format!("write {} failed: {e}", path.display())))?;

        info!("Stored resume at {} ({} bytes)", path.display(), bytes.len());
        Ok(format!("{}{LOCAL_RESUME_ROUTE}/{key}", self.public_base_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_writes_file_and_returns_public_url() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("resumes");
        let store = LocalResumeStore::new(&root, "http://localhost:5000/")
            .await
            .unwrap();

        let url = store
            .put("resume-1.pdf", Bytes::from_static(b"%PDF-1.4"), "application/pdf")
            .await
            .unwrap();

        assert_eq!(url, "http://localhost:5000/uploads/resumes/resume-1.pdf");
        let written = tokio::fs::read(root.join("resume-1.pdf")).await.unwrap();
        assert_eq!(written, b"%PDF-1.4");
    }

    #[tokio::test]
    async fn test_put_rejects_path_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalResumeStore::new(dir.path(), "http://localhost")
            .await
            .unwrap();

        let result = store
            .put("../escape.pdf", Bytes::from_static(b"x"), "application/pdf")
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
