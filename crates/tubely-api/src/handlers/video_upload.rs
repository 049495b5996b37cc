use crate::auth::AuthUser;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    Json,
};
use futures::TryStreamExt;
use std::io;
use std::sync::Arc;
use tokio_util::io::StreamReader;
use tubely_core::constants::VIDEO_FORM_FIELD;
use tubely_core::{AppError, Video};
use tubely_processing::UploadRequest;
use uuid::Uuid;

/// Upload the video file for an existing record.
///
/// The `video` part is streamed straight into the staging area; other parts
/// are skipped.
#[utoipa::path(
    post,
    path = "/api/video_upload/{video_id}",
    tag = "videos",
    params(
        ("video_id" = Uuid, Path, description = "Video record ID")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Video uploaded", body = Video),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Missing token or not the owner", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 415, description = "Unsupported content type", body = ErrorResponse),
        (status = 422, description = "File could not be processed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(video_id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Video>, HttpAppError> {
    let video_id = Uuid::parse_str(&video_id)?;
    let mut multipart = multipart?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some(VIDEO_FORM_FIELD) {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        tracing::debug!(
            video_id = %video_id,
            content_type = %content_type,
            "Receiving video upload"
        );

        let body = StreamReader::new(Box::pin(field.map_err(io::Error::other)));
        let request = UploadRequest::new(video_id, user.user_id, content_type, body);
        let video = state.pipeline.upload_video(request).await?;
        return Ok(Json(video));
    }

    Err(AppError::InvalidInput(format!("Missing multipart field '{}'", VIDEO_FORM_FIELD)).into())
}
