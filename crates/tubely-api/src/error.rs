//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`. Anything that
//! converts into `AppError` renders through the same `ErrorResponse` body and
//! is logged at the level the variant declares.

use axum::{
    extract::multipart::MultipartRejection,
    extract::rejection::JsonRejection,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};
use tubely_core::{AppError, ErrorMetadata, LogLevel};
use tubely_processing::PipelineError;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

/// Wrapper so `IntoResponse` can be implemented for the core `AppError`.
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        })
    }
}

impl From<PipelineError> for HttpAppError {
    fn from(err: PipelineError) -> Self {
        HttpAppError(AppError::from(err))
    }
}

impl From<uuid::Error> for HttpAppError {
    fn from(_: uuid::Error) -> Self {
        HttpAppError(AppError::InvalidInput("Invalid video ID".to_string()))
    }
}

/// Convert JSON body deserialization failures into a 400 with our ErrorResponse format.
impl From<JsonRejection> for HttpAppError {
    fn from(rejection: JsonRejection) -> Self {
        HttpAppError(AppError::InvalidInput(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    }
}

impl From<MultipartRejection> for HttpAppError {
    fn from(rejection: MultipartRejection) -> Self {
        HttpAppError(AppError::InvalidInput(format!(
            "Invalid multipart body: {}",
            rejection.body_text()
        )))
    }
}

/// JSON body extractor that answers deserialization failures with a 400 `ErrorResponse`.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(inner) = Json::<T>::from_request(req, state)
            .await
            .map_err(HttpAppError::from)?;
        Ok(ValidatedJson(inner))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(
                error = %error,
                details = %error.detailed_message(),
                error_type = error_type,
                "Error occurred"
            );
        }
    }
}

fn is_production_env() -> bool {
    std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .map(|env| env.to_lowercase() == "production" || env.to_lowercase() == "prod")
        .unwrap_or(false)
}

impl HttpAppError {
    fn to_error_response(&self, is_production: bool) -> ErrorResponse {
        let app_error = &self.0;
        let hide_details = is_production || app_error.is_sensitive();
        ErrorResponse {
            error: app_error.client_message(),
            details: (!hide_details).then(|| app_error.detailed_message()),
            error_type: (!hide_details).then(|| app_error.error_type().to_string()),
            code: app_error.error_code().to_string(),
            recoverable: app_error.is_recoverable(),
            suggested_action: app_error.suggested_action().map(String::from),
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(&self.0);

        let body = self.to_error_response(is_production_env());
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tubely_processing::ProcessingError;

    #[test]
    fn test_pipeline_error_status() {
        let err = HttpAppError::from(PipelineError::UnsupportedMediaType("video/avi".into()));
        assert_eq!(err.into_response().status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let err = HttpAppError::from(PipelineError::Unauthorized);
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_sensitive_error_hides_details() {
        let err = HttpAppError::from(PipelineError::Processing(ProcessingError::RemuxFailed {
            stderr: "/tmp/tubely-upload-x/upload.mp4: moov atom not found".into(),
        }));
        let body = err.to_error_response(false);

        assert_eq!(body.code, "MEDIA_CONVERSION_ERROR");
        assert!(body.details.is_none());
        assert!(!body.error.contains("/tmp"));
    }

    #[test]
    fn test_details_shown_outside_production_only() {
        let err = HttpAppError(AppError::InvalidInput("title is empty".into()));

        let dev = err.to_error_response(false);
        assert!(dev.details.unwrap().contains("title is empty"));
        assert!(dev.error_type.is_some());

        let prod = err.to_error_response(true);
        assert!(prod.details.is_none());
        assert!(prod.error_type.is_none());
    }

    #[test]
    fn test_bad_uuid_is_invalid_input() {
        let err = HttpAppError::from(uuid::Uuid::parse_str("not-a-uuid").unwrap_err());
        assert_eq!(err.0.http_status_code(), 400);
    }
}
