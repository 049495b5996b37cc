use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A video record as held by the record store.
///
/// `user_id` is the owner; only the owner may cause `video_url` or
/// `thumbnail_url` to be set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Video {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Video {
    /// New draft record without any media attached.
    pub fn new_draft(user_id: Uuid, title: String, description: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            title,
            description,
            thumbnail_url: None,
            video_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

/// Body of `POST /api/videos`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateVideoRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_has_no_media() {
        let owner = Uuid::new_v4();
        let video = Video::new_draft(owner, "Boots".to_string(), String::new());
        assert!(video.video_url.is_none());
        assert!(video.thumbnail_url.is_none());
        assert!(video.is_owned_by(owner));
        assert!(!video.is_owned_by(Uuid::new_v4()));
    }

    #[test]
    fn create_request_requires_title() {
        let req = CreateVideoRequest {
            title: String::new(),
            description: "desc".to_string(),
        };
        assert!(req.validate().is_err());

        let req = CreateVideoRequest {
            title: "ok".to_string(),
            description: String::new(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn video_serializes_optional_urls_as_null() {
        let video = Video::new_draft(Uuid::new_v4(), "t".to_string(), "d".to_string());
        let json = serde_json::to_value(&video).unwrap();
        assert!(json["video_url"].is_null());
        assert_eq!(json["title"], "t");
    }
}
