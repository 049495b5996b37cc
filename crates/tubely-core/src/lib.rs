//! Tubely Core Library
//!
//! This crate provides core domain models, error types, configuration and shared
//! constants used by every Tubely component.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::{Config, VideoUrlMode};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{Orientation, Video};
pub use storage_types::StorageBackend;
