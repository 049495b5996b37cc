//! Shared key generation for storage backends.
//!
//! Video keys: `{orientation}/{random-id}.{ext}`. Thumbnail keys:
//! `thumbnails/{video_id}.{ext}`.

use crate::traits::{StorageError, StorageResult};
use tubely_core::constants::extension_for_content_type;
use tubely_core::Orientation;
use uuid::Uuid;

/// Generate a fresh key for an uploaded video.
///
/// The identifier is a random v4 UUID, so two uploads never share a key even
/// for the same owner and content type.
pub fn video_storage_key(orientation: Orientation, content_type: &str) -> StorageResult<String> {
    let extension = extension(content_type)?;
    Ok(format!(
        "{}/{}.{}",
        orientation.as_str(),
        Uuid::new_v4().simple(),
        extension
    ))
}

/// Key for a video's thumbnail. Re-uploading replaces the previous object.
pub fn thumbnail_storage_key(video_id: Uuid, content_type: &str) -> StorageResult<String> {
    let extension = extension(content_type)?;
    Ok(format!("thumbnails/{}.{}", video_id, extension))
}

/// Reject keys that could escape a backend's namespace.
pub(crate) fn validate_key(storage_key: &str) -> StorageResult<()> {
    if storage_key.is_empty() {
        return Err(StorageError::InvalidKey("Storage key is empty".to_string()));
    }
    if storage_key.contains("..") || storage_key.starts_with('/') {
        return Err(StorageError::InvalidKey(
            "Storage key contains invalid characters".to_string(),
        ));
    }
    Ok(())
}

fn extension(content_type: &str) -> StorageResult<&'static str> {
    extension_for_content_type(content_type).ok_or_else(|| {
        StorageError::InvalidKey(format!("No file extension known for {}", content_type))
    })
}
