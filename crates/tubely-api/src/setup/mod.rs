//! Application setup and initialization

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use crate::auth::JwtService;
use crate::state::AppState;
use anyhow::{Context, Result};
use std::sync::Arc;
use tubely_core::Config;
use tubely_processing::{FfmpegTools, MediaTools, UploadPipeline, UploadPipelineConfig};

/// Build every component from `config` and return the shared state and router.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    config
        .validate()
        .context("Configuration validation failed")?;

    crate::telemetry::init_telemetry();
    tracing::info!(
        environment = %config.environment,
        "Configuration loaded and validated successfully"
    );

    let repository = database::setup_repository(&config).await?;
    let storage = storage::setup_storage(&config).await?;

    let tools: Arc<dyn MediaTools> = Arc::new(
        FfmpegTools::new(config.ffmpeg_path.clone(), config.ffprobe_path.clone())
            .context("Invalid media tool configuration")?,
    );

    let pipeline = UploadPipeline::new(
        repository.clone(),
        storage.clone(),
        tools,
        UploadPipelineConfig::from_config(&config),
    );

    let state = Arc::new(AppState {
        jwt: JwtService::new(&config.jwt_secret, config.jwt_issuer.clone()),
        config: config.clone(),
        repository,
        storage,
        pipeline,
    });

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
