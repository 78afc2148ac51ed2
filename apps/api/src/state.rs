use std::sync::Arc;

use sqlx::PgPool;

use crate::compatibility::scorer::CompatibilityScorer;
use crate::config::Config;
use crate::storage::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Pluggable compatibility scorer. Default: SkillOverlapScorer.
    pub scorer: Arc<dyn CompatibilityScorer>,
    /// Local disk or S3, chosen by `RESUME_STORAGE`.
    pub resume_store: Arc<dyn ResumeStore>,
}
