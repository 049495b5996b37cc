//! Upload pipeline orchestrator.
//!
//! `upload_video` is a straight sequence of fallible steps inside one staging
//! scope: any `?` drops the `StagedUpload` and with it both temporary files.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncRead;
use uuid::Uuid;

use tubely_core::constants::{
    normalize_mime_type, ALLOWED_THUMBNAIL_CONTENT_TYPES, ALLOWED_VIDEO_CONTENT_TYPES,
};
use tubely_core::{Config, Video, VideoUrlMode};
use tubely_db::VideoRepository;
use tubely_storage::{thumbnail_storage_key, video_storage_key, ByteReader, Storage};

use super::error::PipelineError;
use super::staging::{StagedUpload, StagingError};
use super::types::{ThumbnailUpload, UploadRequest};
use crate::tools::MediaTools;

/// Limits and URL policy for the pipeline.
#[derive(Debug, Clone)]
pub struct UploadPipelineConfig {
    pub max_video_upload_bytes: u64,
    pub max_thumbnail_upload_bytes: u64,
    pub video_url_mode: VideoUrlMode,
    pub presigned_url_ttl: Duration,
    pub temp_dir: PathBuf,
}

impl UploadPipelineConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_video_upload_bytes: config.max_video_upload_bytes,
            max_thumbnail_upload_bytes: config.max_thumbnail_upload_bytes,
            video_url_mode: config.video_url_mode,
            presigned_url_ttl: config.presigned_url_ttl(),
            temp_dir: config.upload_temp_dir(),
        }
    }
}

#[derive(Clone)]
pub struct UploadPipeline {
    repository: Arc<dyn VideoRepository>,
    storage: Arc<dyn Storage>,
    tools: Arc<dyn MediaTools>,
    config: UploadPipelineConfig,
}

impl UploadPipeline {
    pub fn new(
        repository: Arc<dyn VideoRepository>,
        storage: Arc<dyn Storage>,
        tools: Arc<dyn MediaTools>,
        config: UploadPipelineConfig,
    ) -> Self {
        Self {
            repository,
            storage,
            tools,
            config,
        }
    }

    pub fn config(&self) -> &UploadPipelineConfig {
        &self.config
    }

    /// Ingest a video for `request.video_id` and return the updated record.
    #[tracing::instrument(skip(self, request), fields(
        video_id = %request.video_id,
        user_id = %request.user_id,
        content_type = %request.content_type
    ))]
    pub async fn upload_video<R>(&self, request: UploadRequest<R>) -> Result<Video, PipelineError>
    where
        R: AsyncRead + Unpin + Send,
    {
        let start = std::time::Instant::now();

        // Received -> Validated
        let video = self
            .load_owned_video(request.video_id, request.user_id)
            .await?;
        let content_type = allowed_content_type(&request.content_type, ALLOWED_VIDEO_CONTENT_TYPES)?;
        let limit = self.config.max_video_upload_bytes;
        if let Some(declared) = request.declared_size {
            if declared > limit {
                return Err(StagingError::TooLarge { limit }.into());
            }
        }

        // Validated -> Staged
        let staged = StagedUpload::stage(&self.config.temp_dir, request.body, limit).await?;

        // Staged -> Remuxed and Probed; geometry comes from the original.
        let (remuxed_path, probe) = tokio::try_join!(
            self.tools.remux(staged.path()),
            self.tools.probe(staged.path())
        )?;

        // Probed -> key
        let orientation = probe.orientation();
        let key = video_storage_key(orientation, &content_type)?;

        // Remuxed + key -> Uploaded
        let remuxed = tokio::fs::File::open(&remuxed_path)
            .await
            .map_err(StagingError::Io)?;
        let remuxed_size = remuxed.metadata().await.map_err(StagingError::Io)?.len();
        let reader: ByteReader = Box::pin(remuxed);
        self.storage
            .put_stream(&key, &content_type, Some(remuxed_size), reader)
            .await?;

        // Uploaded -> Recorded
        let url = match self.playable_url(&key).await {
            Ok(url) => url,
            Err(e) => {
                self.discard_object(&key).await;
                return Err(e);
            }
        };
        // Only the URL column is written so a concurrent thumbnail upload is kept.
        let updated = match self.repository.set_video_url(video.id, &url).await {
            Ok(updated) => updated,
            Err(e) => {
                self.discard_object(&key).await;
                return Err(PipelineError::Persistence(e));
            }
        };

        tracing::info!(
            key = %key,
            orientation = %orientation,
            width = probe.width,
            height = probe.height,
            size_bytes = remuxed_size,
            staged_size_bytes = staged.size(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Video upload completed"
        );

        // Recorded -> Done; `staged` drops here and removes both files.
        Ok(updated)
    }

    /// Store a thumbnail under `thumbnails/{video_id}.{ext}` and record its URL.
    #[tracing::instrument(skip(self, upload), fields(
        video_id = %upload.video_id,
        user_id = %upload.user_id,
        size_bytes = upload.data.len()
    ))]
    pub async fn upload_thumbnail(&self, upload: ThumbnailUpload) -> Result<Video, PipelineError> {
        let video = self
            .load_owned_video(upload.video_id, upload.user_id)
            .await?;
        let content_type =
            allowed_content_type(&upload.content_type, ALLOWED_THUMBNAIL_CONTENT_TYPES)?;

        let limit = self.config.max_thumbnail_upload_bytes;
        if upload.data.len() as u64 > limit {
            return Err(StagingError::TooLarge { limit }.into());
        }
        if upload.data.is_empty() {
            return Err(PipelineError::InvalidInput(
                "Thumbnail file is empty".to_string(),
            ));
        }

        let key = thumbnail_storage_key(video.id, &content_type)?;
        let url = self.storage.put(&key, &content_type, upload.data).await?;

        // Thumbnail keys are stable per video, so there is no object to discard
        // if the update fails.
        self.repository
            .set_thumbnail_url(video.id, &url)
            .await
            .map_err(PipelineError::Persistence)
    }

    async fn load_owned_video(&self, video_id: Uuid, user_id: Uuid) -> Result<Video, PipelineError> {
        let video = self
            .repository
            .get_video(video_id)
            .await
            .map_err(PipelineError::Persistence)?
            .ok_or(PipelineError::VideoNotFound(video_id))?;

        if !video.is_owned_by(user_id) {
            tracing::warn!(
                video_id = %video_id,
                user_id = %user_id,
                "Upload rejected: caller does not own the video"
            );
            return Err(PipelineError::Unauthorized);
        }

        Ok(video)
    }

    async fn playable_url(&self, key: &str) -> Result<String, PipelineError> {
        match self.config.video_url_mode {
            VideoUrlMode::Public => Ok(self.storage.object_url(key)),
            VideoUrlMode::Presigned => Ok(self
                .storage
                .presigned_url(key, self.config.presigned_url_ttl)
                .await?),
        }
    }

    /// Best-effort removal of an object whose record update did not happen.
    async fn discard_object(&self, key: &str) {
        if let Err(e) = self.storage.delete(key).await {
            tracing::error!(
                error = %e,
                key = %key,
                "Failed to delete uploaded object after record update failure"
            );
        } else {
            tracing::warn!(key = %key, "Deleted uploaded object after record update failure");
        }
    }
}

fn allowed_content_type(claimed: &str, allowed: &[&str]) -> Result<String, PipelineError> {
    let normalized = normalize_mime_type(claimed);
    if normalized.is_empty() {
        return Err(PipelineError::InvalidInput(
            "Missing content type".to_string(),
        ));
    }
    if !allowed.contains(&normalized.as_str()) {
        return Err(PipelineError::UnsupportedMediaType(normalized));
    }
    Ok(normalized)
}
