use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tubely_core::{AppError, Video};
use uuid::Uuid;

use super::repository::VideoRepository;

/// Record store kept in process memory.
///
/// Used when `DATABASE_URL` is unset and by the test suites.
#[derive(Default)]
pub struct InMemoryVideoRepository {
    videos: RwLock<HashMap<Uuid, Video>>,
}

impl InMemoryVideoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl VideoRepository for InMemoryVideoRepository {
    async fn create_video(&self, video: &Video) -> Result<Video, AppError> {
        let mut videos = self.videos.write().await;
        if videos.contains_key(&video.id) {
            return Err(AppError::InvalidInput(format!(
                "Video {} already exists",
                video.id
            )));
        }
        videos.insert(video.id, video.clone());
        Ok(video.clone())
    }

    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        Ok(self.videos.read().await.get(&id).cloned())
    }

    async fn set_video_url(&self, id: Uuid, url: &str) -> Result<Video, AppError> {
        let mut videos = self.videos.write().await;
        let stored = videos
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Video {} not found", id)))?;

        stored.video_url = Some(url.to_string());
        stored.updated_at = Utc::now();

        Ok(stored.clone())
    }

    async fn set_thumbnail_url(&self, id: Uuid, url: &str) -> Result<Video, AppError> {
        let mut videos = self.videos.write().await;
        let stored = videos
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Video {} not found", id)))?;

        stored.thumbnail_url = Some(url.to_string());
        stored.updated_at = Utc::now();

        Ok(stored.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> Video {
        Video::new_draft(Uuid::new_v4(), "Boots".to_string(), "desc".to_string())
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let repo = InMemoryVideoRepository::new();
        let video = draft();

        repo.create_video(&video).await.unwrap();
        let fetched = repo.get_video(video.id).await.unwrap().unwrap();

        assert_eq!(fetched, video);
        assert_eq!(repo.videos.read().await.len(), 1);
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let repo = InMemoryVideoRepository::new();
        assert!(repo.get_video(Uuid::new_v4()).await.unwrap().is_none());
        assert!(repo.videos.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_create_rejected() {
        let repo = InMemoryVideoRepository::new();
        let video = draft();

        repo.create_video(&video).await.unwrap();
        let result = repo.create_video(&video).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_set_video_url_keeps_other_fields() {
        let repo = InMemoryVideoRepository::new();
        let video = draft();
        repo.create_video(&video).await.unwrap();

        let updated = repo
            .set_video_url(video.id, "https://example.com/landscape/a.mp4")
            .await
            .unwrap();

        assert_eq!(
            updated.video_url.as_deref(),
            Some("https://example.com/landscape/a.mp4")
        );
        assert_eq!(updated.user_id, video.user_id);
        assert_eq!(updated.title, video.title);
        assert!(updated.thumbnail_url.is_none());
        assert!(updated.updated_at >= video.updated_at);
    }

    #[tokio::test]
    async fn test_url_setters_do_not_overwrite_each_other() {
        let repo = InMemoryVideoRepository::new();
        let video = draft();
        repo.create_video(&video).await.unwrap();

        repo.set_thumbnail_url(video.id, "https://example.com/thumb.png")
            .await
            .unwrap();
        let updated = repo
            .set_video_url(video.id, "https://example.com/other/b.mp4")
            .await
            .unwrap();

        assert_eq!(
            updated.thumbnail_url.as_deref(),
            Some("https://example.com/thumb.png")
        );
        assert_eq!(
            updated.video_url.as_deref(),
            Some("https://example.com/other/b.mp4")
        );
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = InMemoryVideoRepository::new();
        let result = repo.set_video_url(Uuid::new_v4(), "https://example.com/a.mp4").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        let result = repo
            .set_thumbnail_url(Uuid::new_v4(), "https://example.com/t.png")
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
