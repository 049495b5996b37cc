use tubely_core::{AppError, Video};
use uuid::Uuid;

/// Trait for video record operations
/// This abstracts the record store implementation (PostgreSQL or in-memory)
#[async_trait::async_trait]
pub trait VideoRepository: Send + Sync {
    /// Insert a new record.
    async fn create_video(&self, video: &Video) -> Result<Video, AppError>;

    /// Fetch a record by id. `Ok(None)` when it does not exist.
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError>;

    /// Set the playable URL of an existing record and bump `updated_at`.
    ///
    /// Only `video_url` is written, so concurrent writes to other fields of the
    /// same record are kept. Fails with `AppError::NotFound` if the record
    /// disappeared in the meantime.
    async fn set_video_url(&self, id: Uuid, url: &str) -> Result<Video, AppError>;

    /// Set the thumbnail URL of an existing record and bump `updated_at`.
    async fn set_thumbnail_url(&self, id: Uuid, url: &str) -> Result<Video, AppError>;
}
