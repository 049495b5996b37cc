use crate::auth::AuthUser;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    Json,
};
use std::sync::Arc;
use tubely_core::constants::THUMBNAIL_FORM_FIELD;
use tubely_core::{AppError, Video};
use tubely_processing::ThumbnailUpload;
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/thumbnail_upload/{video_id}",
    tag = "videos",
    params(
        ("video_id" = Uuid, Path, description = "Video record ID")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Thumbnail uploaded", body = Video),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Missing token or not the owner", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 415, description = "Unsupported content type", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn upload_thumbnail(
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
        if field.name() != Some(THUMBNAIL_FORM_FIELD) {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        let data = field.bytes().await.map_err(|e| {
            AppError::InvalidInput(format!("Failed to read thumbnail: {}", e))
        })?;

        let upload = ThumbnailUpload {
            video_id,
            user_id: user.user_id,
            content_type,
            data: data.to_vec(),
        };
        let video = state.pipeline.upload_thumbnail(upload).await?;
        return Ok(Json(video));
    }

    Err(AppError::InvalidInput(format!(
        "Missing multipart field '{}'",
        THUMBNAIL_FORM_FIELD
    ))
    .into())
}
