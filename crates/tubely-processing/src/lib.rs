//! Tubely Media Processing Library
//!
//! Wraps the external `ffprobe`/`ffmpeg` tools behind the `MediaTools` trait and
//! drives the video upload pipeline: stage → remux ∥ probe → classify → store →
//! record.

pub mod error;
pub mod probe;
pub mod remux;
pub mod tools;
pub mod upload;

// Re-export commonly used types
pub use error::ProcessingError;
pub use probe::ProbeResult;
pub use tools::{FfmpegTools, MediaTools};
pub use upload::{
    PipelineError, StagingError, ThumbnailUpload, UploadPipeline, UploadPipelineConfig,
    UploadRequest,
};
