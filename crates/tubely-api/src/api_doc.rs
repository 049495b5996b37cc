//! OpenAPI documentation, served at `/api/openapi.json`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::error;
use crate::handlers;
use tubely_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tubely API",
        version = "0.1.0",
        description = "Video upload service. Uploaded MP4s are remuxed for fast start, classified by aspect ratio and stored under an orientation prefix."
    ),
    paths(
        handlers::health::health_check,
        handlers::videos::create_video,
        handlers::videos::get_video,
        handlers::video_upload::upload_video,
        handlers::thumbnail_upload::upload_thumbnail,
    ),
    components(
        schemas(
            models::Video,
            models::CreateVideoRequest,
            models::Orientation,
            handlers::health::HealthResponse,
            error::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "videos", description = "Video records and media uploads"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_upload_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/video_upload/{video_id}"));
        assert!(doc.paths.paths.contains_key("/api/thumbnail_upload/{video_id}"));
        assert!(doc.paths.paths.contains_key("/api/videos/{video_id}"));
        assert!(doc
            .components
            .as_ref()
            .is_some_and(|c| c.security_schemes.contains_key("bearer_auth")));
    }
}
