use crate::auth::AuthUser;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tubely_core::models::CreateVideoRequest;
use tubely_core::{AppError, Video};
use uuid::Uuid;
use validator::Validate;

/// Create a draft video record owned by the caller.
#[utoipa::path(
    post,
    path = "/api/videos",
    tag = "videos",
    request_body = CreateVideoRequest,
    responses(
        (status = 201, description = "Video draft created", body = Video),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_video(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateVideoRequest>,
) -> Result<(StatusCode, Json<Video>), HttpAppError> {
    request.validate().map_err(AppError::from)?;

    let draft = Video::new_draft(user.user_id, request.title, request.description);
    let video = state.repository.create_video(&draft).await?;

    tracing::info!(video_id = %video.id, user_id = %user.user_id, "Video draft created");

    Ok((StatusCode::CREATED, Json(video)))
}

/// Fetch a video record. Only the owner may read it.
#[utoipa::path(
    get,
    path = "/api/videos/{video_id}",
    tag = "videos",
    params(
        ("video_id" = Uuid, Path, description = "Video record ID")
    ),
    responses(
        (status = 200, description = "Video record", body = Video),
        (status = 400, description = "Invalid video ID", body = ErrorResponse),
        (status = 401, description = "Missing token or not the owner", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_video(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(video_id): Path<String>,
) -> Result<Json<Video>, HttpAppError> {
    let video_id = Uuid::parse_str(&video_id)?;

    let video = state
        .repository
        .get_video(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Video {} not found", video_id)))?;

    if !video.is_owned_by(user.user_id) {
        return Err(AppError::Unauthorized("User is not the owner of this video".to_string()).into());
    }

    Ok(Json(video))
}
