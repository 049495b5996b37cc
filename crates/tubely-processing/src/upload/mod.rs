//! Upload pipeline: validate → stage → remux ∥ probe → store → record.

pub mod error;
pub mod pipeline;
pub mod staging;
pub mod types;

pub use error::PipelineError;
pub use pipeline::{UploadPipeline, UploadPipelineConfig};
pub use staging::{StagedUpload, StagingError};
pub use types::{ThumbnailUpload, UploadRequest};
