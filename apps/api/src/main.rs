mod applications;
mod auth;
mod companies;
mod compatibility;
mod config;
mod db;
mod errors;
mod jobs;
mod models;
mod routes;
mod seed;
mod state;
mod storage;
mod users;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::compatibility::scorer::SkillOverlapScorer;
use crate::config::{Config, StorageBackend};
use crate::db::create_pool;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::{LocalResumeStore, ResumeStore, S3ResumeStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JobPortal API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (runs migrations)
    let db = create_pool(&config.database_url).await?;

    if config.seed_demo_data {
        seed::seed_demo_data(&db).await?;
    }

    let resume_store = build_resume_store(&config).await?;

    let state = AppState {
        db,
        config: config.clone(),
        scorer: Arc::new(SkillOverlapScorer),
        resume_store,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // the SPA is served from another origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_resume_store(config: &Config) -> Result<Arc<dyn ResumeStore>> {
    match config.storage {
        StorageBackend::Local => {
            let store = LocalResumeStore::new(&config.upload_dir, &config.public_base_url).await?;
            info!("Resume storage: local directory {}", config.upload_dir);
            Ok(Arc::new(store))
        }
        StorageBackend::S3 => {
            let s3 = config
                .s3
                .as_ref()
                .context("RESUME_STORAGE=s3 requires S3 settings")?;
            let store = S3ResumeStore::new(s3).await;
            info!("Resume storage: s3://{} via {}", s3.bucket, s3.endpoint);
            Ok(Arc::new(store))
        }
    }
}
