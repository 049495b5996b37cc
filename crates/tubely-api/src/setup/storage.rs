//! Object storage setup

use anyhow::{Context, Result};
use std::sync::Arc;
use tubely_core::{Config, VideoUrlMode};
use tubely_storage::{create_storage, Storage};

pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    let storage = create_storage(config)
        .await
        .context("Failed to initialize storage backend")?;

    tracing::info!(
        backend = %storage.backend_type(),
        video_url_mode = ?config.video_url_mode,
        "Storage initialized"
    );

    if config.video_url_mode == VideoUrlMode::Presigned {
        tracing::warn!(
            ttl_secs = config.presigned_url_ttl_secs,
            "Stored video URLs are presigned and expire after the configured TTL"
        );
    }

    Ok(storage)
}
