//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use std::pin::Pin;
use std::time::Duration;
use thiserror::Error;
use tokio::io::AsyncRead;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Signing failed: {0}")]
    SigningFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed async byte source handed to streaming uploads.
pub type ByteReader = Pin<Box<dyn AsyncRead + Send + Unpin>>;

/// Storage abstraction trait
///
/// Writes land under the exact key given and silently overwrite an existing
/// object. Nothing is retried at this layer.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Upload an in-memory object under `storage_key`. Returns the object URL.
    async fn put(
        &self,
        storage_key: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<String>;

    /// Stream an object from `reader` until EOF under `storage_key`.
    /// Returns the object URL.
    ///
    /// `content_length` is advisory and only used for logging.
    async fn put_stream(
        &self,
        storage_key: &str,
        content_type: &str,
        content_length: Option<u64>,
        reader: ByteReader,
    ) -> StorageResult<String>;

    /// Generate a time-limited GET URL for `storage_key`.
    ///
    /// Expiry only affects the link; the object itself is kept.
    async fn presigned_url(&self, storage_key: &str, expires_in: Duration)
        -> StorageResult<String>;

    /// Delete an object. Deleting a missing key is not an error.
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;

    /// Check if an object exists
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// Plain (unsigned) URL of an object.
    fn object_url(&self, storage_key: &str) -> String;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
