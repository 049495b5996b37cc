pub mod health;
pub mod thumbnail_upload;
pub mod video_upload;
pub mod videos;
