use anyhow::{bail, Context, Result};

/// Where uploaded resumes are written.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageBackend {
    Local,
    S3,
}

/// S3 / MinIO settings, only required when `RESUME_STORAGE=s3`.
#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub endpoint: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub port: u16,
    pub rust_log: String,
    pub storage: StorageBackend,
    pub upload_dir: String,
    pub public_base_url: String,
    pub s3: Option<S3Config>,
    pub seed_demo_data: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        let storage = parse_storage_backend(
            &std::env::var("RESUME_STORAGE").unwrap_or_else(|_| "local".to_string()),
        )?;

        let s3 = if storage == StorageBackend::S3 {
            Some(S3Config {
                bucket: require_env("S3_BUCKET")?,
                endpoint: require_env("S3_ENDPOINT")?,
                access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
                secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            })
        } else {
            None
        };

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            jwt_secret: require_env("JWT_SECRET")?,
            port,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            storage,
            upload_dir: std::env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| "uploads/resumes".to_string()),
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| format!("http://localhost:{port}")),
            s3,
            seed_demo_data: parse_flag(&std::env::var("SEED_DEMO_DATA").unwrap_or_default()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_storage_backend(value: &str) -> Result<StorageBackend> {
    match value.trim().to_lowercase().as_str() {
        "" | "local" => Ok(StorageBackend::Local),
        "s3" => Ok(StorageBackend::S3),
        other => bail!("RESUME_STORAGE must be 'local' or 's3', got '{other}'"),
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_backend_defaults_to_local() {
        assert_eq!(parse_storage_backend("").unwrap(), StorageBackend::Local);
        assert_eq!(parse_storage_backend("LOCAL").unwrap(), StorageBackend::Local);
        assert_eq!(parse_storage_backend(" s3 ").unwrap(), StorageBackend::S3);
    }

    #[test]
    fn test_unknown_storage_backend_is_rejected() {
        assert!(parse_storage_backend("gcs").is_err());
    }

    #[test]
    fn test_seed_flag_parsing() {
        assert!(parse_flag("true"));
        assert!(parse_flag("1"));
        assert!(!parse_flag(""));
        assert!(!parse_flag("no"));
    }
}
