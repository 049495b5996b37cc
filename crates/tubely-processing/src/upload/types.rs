//! Types for the upload pipeline.

use tokio::io::AsyncRead;
use uuid::Uuid;

/// One video upload as handed over by the HTTP layer.
pub struct UploadRequest<R> {
    pub video_id: Uuid,
    /// Authenticated caller; must own the record.
    pub user_id: Uuid,
    /// Content type claimed by the client, MIME parameters allowed.
    pub content_type: String,
    /// Size announced by the client, if any. Checked before staging.
    pub declared_size: Option<u64>,
    pub body: R,
}

impl<R: AsyncRead + Unpin + Send> UploadRequest<R> {
    pub fn new(video_id: Uuid, user_id: Uuid, content_type: impl Into<String>, body: R) -> Self {
        Self {
            video_id,
            user_id,
            content_type: content_type.into(),
            declared_size: None,
            body,
        }
    }

    pub fn with_declared_size(mut self, size: u64) -> Self {
        self.declared_size = Some(size);
        self
    }
}

/// A thumbnail image, already buffered (thumbnails are small).
#[derive(Clone, Debug)]
pub struct ThumbnailUpload {
    pub video_id: Uuid,
    pub user_id: Uuid,
    pub content_type: String,
    pub data: Vec<u8>,
}
