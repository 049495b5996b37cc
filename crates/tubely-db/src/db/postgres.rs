use sqlx::{PgPool, Postgres};
use tubely_core::{AppError, Video};
use uuid::Uuid;

use super::repository::VideoRepository;

#[derive(Clone)]
pub struct PgVideoRepository {
    pool: PgPool,
}

impl PgVideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl VideoRepository for PgVideoRepository {
    #[tracing::instrument(skip(self, video), fields(db.table = "videos", db.operation = "insert", db.record_id = %video.id))]
    async fn create_video(&self, video: &Video) -> Result<Video, AppError> {
        let row = sqlx::query_as::<Postgres, Video>(
            r#"
            INSERT INTO videos (
                id, user_id, title, description, thumbnail_url, video_url, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, user_id, title, description, thumbnail_url, video_url, created_at, updated_at
            "#,
        )
        .bind(video.id)
        .bind(video.user_id)
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.thumbnail_url)
        .bind(&video.video_url)
        .bind(video.created_at)
        .bind(video.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select", db.record_id = %id))]
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        let row = sqlx::query_as::<Postgres, Video>(
            r#"
            SELECT id, user_id, title, description, thumbnail_url, video_url, created_at, updated_at
            FROM videos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    #[tracing::instrument(skip(self, url), fields(db.table = "videos", db.operation = "update", db.record_id = %id))]
    async fn set_video_url(&self, id: Uuid, url: &str) -> Result<Video, AppError> {
        let row = sqlx::query_as::<Postgres, Video>(
            r#"
            UPDATE videos
            SET video_url = $2,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, title, description, thumbnail_url, video_url, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(url)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| AppError::NotFound(format!("Video {} not found", id)))
    }

    #[tracing::instrument(skip(self, url), fields(db.table = "videos", db.operation = "update", db.record_id = %id))]
    async fn set_thumbnail_url(&self, id: Uuid, url: &str) -> Result<Video, AppError> {
        let row = sqlx::query_as::<Postgres, Video>(
            r#"
            UPDATE videos
            SET thumbnail_url = $2,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, title, description, thumbnail_url, video_url, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(url)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| AppError::NotFound(format!("Video {} not found", id)))
    }
}
