//! Shared limits and allow-lists.

/// Hard ceiling for a single video upload (1 GiB).
pub const MAX_VIDEO_UPLOAD_BYTES: u64 = 1 << 30;

/// Hard ceiling for a thumbnail upload (10 MiB).
pub const MAX_THUMBNAIL_UPLOAD_BYTES: u64 = 10 << 20;

/// Content types accepted by the video upload pipeline.
pub const ALLOWED_VIDEO_CONTENT_TYPES: &[&str] = &["video/mp4"];

/// Content types accepted for thumbnails.
pub const ALLOWED_THUMBNAIL_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/png"];

/// Default lifetime of a presigned retrieval link.
pub const DEFAULT_PRESIGNED_URL_TTL_SECS: u64 = 3600;

/// Multipart field carrying the video body.
pub const VIDEO_FORM_FIELD: &str = "video";

/// Multipart field carrying the thumbnail body.
pub const THUMBNAIL_FORM_FIELD: &str = "thumbnail";

/// Strip MIME parameters and lowercase (`"Video/MP4; codecs=avc1"` -> `"video/mp4"`).
pub fn normalize_mime_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
        .to_lowercase()
}

/// Canonical file extension for a content type, if we know one.
pub fn extension_for_content_type(content_type: &str) -> Option<&'static str> {
    match normalize_mime_type(content_type).as_str() {
        "video/mp4" => Some("mp4"),
        "image/jpeg" => Some("jpeg"),
        "image/png" => Some("png"),
        _ => None,
    }
}
