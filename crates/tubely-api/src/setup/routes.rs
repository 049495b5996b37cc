//! Route configuration and setup

use crate::api_doc::ApiDoc;
use crate::constants::{API_PREFIX, MULTIPART_OVERHEAD_BYTES};
use crate::handlers;
use crate::state::AppState;
use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tubely_core::Config;
use utoipa::OpenApi;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router> {
    let cors = setup_cors(config)?;

    let video_body_limit = body_limit(config.max_video_upload_bytes);
    let thumbnail_body_limit = body_limit(config.max_thumbnail_upload_bytes);

    let api_routes = Router::new()
        .route("/healthz", get(handlers::health::health_check))
        .route("/openapi.json", get(openapi_json))
        .route("/videos", post(handlers::videos::create_video))
        .route("/videos/{video_id}", get(handlers::videos::get_video))
        .route(
            "/video_upload/{video_id}",
            post(handlers::video_upload::upload_video)
                .layer(DefaultBodyLimit::max(video_body_limit)),
        )
        .route(
            "/thumbnail_upload/{video_id}",
            post(handlers::thumbnail_upload::upload_thumbnail)
                .layer(DefaultBodyLimit::max(thumbnail_body_limit)),
        )
        .with_state(state);

    // Server-level concurrency limit to protect against resource exhaustion under extreme load
    let http_concurrency_limit = std::env::var("HTTP_CONCURRENCY_LIMIT")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(10_000)
        .max(1);
    tracing::info!(
        http_concurrency_limit = http_concurrency_limit,
        video_body_limit = video_body_limit,
        "HTTP limits configured"
    );

    let app = Router::new()
        .nest(API_PREFIX, api_routes)
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(RequestBodyLimitLayer::new(
            video_body_limit.max(thumbnail_body_limit),
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// File limit plus room for the multipart framing around it.
fn body_limit(file_limit: u64) -> usize {
    usize::try_from(file_limit.saturating_add(MULTIPART_OVERHEAD_BYTES)).unwrap_or(usize::MAX)
}

fn setup_cors(config: &Config) -> Result<CorsLayer> {
    let cors = if config.cors_origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}
