use thiserror::Error;
use tubely_core::AppError;
use tubely_storage::StorageError;
use uuid::Uuid;

use super::staging::StagingError;
use crate::error::ProcessingError;

/// Every way an upload can fail. All of them are terminal for the request.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Video {0} not found")]
    VideoNotFound(Uuid),

    #[error("User is not the owner of this video")]
    Unauthorized,

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error(transparent)]
    Staging(#[from] StagingError),

    #[error("Media processing failed: {0}")]
    Processing(#[from] ProcessingError),

    #[error("Storage failure: {0}")]
    Storage(#[from] StorageError),

    #[error("Failed to record upload: {0}")]
    Persistence(#[source] AppError),
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::InvalidInput(msg) => AppError::InvalidInput(msg),
            PipelineError::VideoNotFound(id) => {
                AppError::NotFound(format!("Video {} not found", id))
            }
            PipelineError::Unauthorized => {
                AppError::Unauthorized("User is not the owner of this video".to_string())
            }
            PipelineError::UnsupportedMediaType(content_type) => AppError::UnsupportedMediaType(
                format!("Content type {} is not allowed", content_type),
            ),
            PipelineError::Staging(StagingError::TooLarge { limit }) => AppError::PayloadTooLarge(
                format!("Upload exceeds the maximum size of {} bytes", limit),
            ),
            PipelineError::Staging(StagingError::Io(e)) => {
                AppError::Internal(format!("Failed to stage upload: {}", e))
            }
            PipelineError::Processing(e) => AppError::MediaConversionError(e.to_string()),
            PipelineError::Storage(e) => AppError::Storage(e.to_string()),
            PipelineError::Persistence(e) => e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tubely_core::ErrorMetadata;

    fn status(err: PipelineError) -> u16 {
        AppError::from(err).http_status_code()
    }

    #[test]
    fn test_category_status_codes() {
        assert_eq!(status(PipelineError::InvalidInput("bad".into())), 400);
        assert_eq!(status(PipelineError::VideoNotFound(Uuid::nil())), 404);
        assert_eq!(status(PipelineError::Unauthorized), 401);
        assert_eq!(
            status(PipelineError::UnsupportedMediaType("video/avi".into())),
            415
        );
        assert_eq!(
            status(PipelineError::Staging(StagingError::TooLarge { limit: 1 })),
            413
        );
        assert_eq!(
            status(PipelineError::Staging(StagingError::Io(std::io::Error::other(
                "disk full"
            )))),
            500
        );
        assert_eq!(
            status(PipelineError::Processing(ProcessingError::RemuxFailed {
                stderr: "moov atom not found".into()
            })),
            422
        );
        assert_eq!(
            status(PipelineError::Storage(StorageError::UploadFailed(
                "connection reset".into()
            ))),
            500
        );
        assert_eq!(
            status(PipelineError::Persistence(AppError::Internal("db".into()))),
            500
        );
    }

    #[test]
    fn test_tool_stderr_not_in_client_message() {
        let err = AppError::from(PipelineError::Processing(ProcessingError::ProbeFailed {
            stderr: "/tmp/tubely-upload-abc/upload.mp4: Invalid data".into(),
        }));
        assert!(!err.client_message().contains("/tmp"));
        assert!(err.is_sensitive());
    }
}
