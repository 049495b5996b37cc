//! Tubely Storage Library
//!
//! The ObjectStore client used by the upload pipeline: a `Storage` trait with S3
//! and local filesystem implementations.
//!
//! # Storage key format
//!
//! - **Videos**: `{orientation}/{random-id}.{ext}`, e.g. `landscape/3f2a...e1.mp4`
//! - **Thumbnails**: `thumbnails/{video_id}.{ext}`
//!
//! Keys must not contain `..` or a leading `/`. Key generation is centralized in
//! the `keys` module so all backends stay consistent.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::{thumbnail_storage_key, video_storage_key};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{ByteReader, Storage, StorageError, StorageResult};
pub use tubely_core::StorageBackend;
