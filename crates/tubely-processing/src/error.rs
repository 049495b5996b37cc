use std::io;
use thiserror::Error;

/// Failures of the external media tools.
///
/// `stderr` carries the tool's diagnostic output; it is logged but never shown
/// to API clients.
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("Invalid media path: {0}")]
    InvalidPath(String),

    #[error("Failed to execute {tool}: {source}")]
    Spawn {
        tool: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("ffprobe failed: {stderr}")]
    ProbeFailed { stderr: String },

    #[error("No usable video stream: {0}")]
    NoStreamFound(String),

    #[error("ffmpeg remux failed: {stderr}")]
    RemuxFailed { stderr: String },
}
