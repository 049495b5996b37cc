//! Test helpers: build AppState and router for integration tests.
//!
//! The app runs against the in-memory record store, local storage in a temp
//! directory and stub media tools, so no database or ffmpeg is needed.
//! Run with `cargo test -p tubely-api`.

pub mod auth;
pub mod media;

use axum_test::TestServer;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tubely_api::auth::JwtService;
use tubely_api::constants;
use tubely_api::setup::routes;
use tubely_api::state::AppState;
use tubely_core::{Config, StorageBackend, Video, VideoUrlMode};
use tubely_db::{InMemoryVideoRepository, VideoRepository};
use tubely_processing::{MediaTools, UploadPipeline, UploadPipelineConfig};
use tubely_storage::create_storage;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-at-least-32-characters-long";
pub const TEST_JWT_ISSUER: &str = "tubely-access";
pub const TEST_BASE_URL: &str = "http://localhost:8091/assets";

/// API path prefix for tests (e.g. `/api`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

/// Test application: server, shared components and owned temp directories.
pub struct TestApp {
    pub server: TestServer,
    pub repository: Arc<InMemoryVideoRepository>,
    pub jwt: JwtService,
    pub storage_dir: TempDir,
    pub staging_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Insert a draft owned by `user_id` directly into the record store.
    pub async fn create_draft(&self, user_id: Uuid) -> Video {
        let draft = Video::new_draft(user_id, "Boots".to_string(), "test video".to_string());
        self.repository.create_video(&draft).await.unwrap()
    }

    pub fn stored_path(&self, url: &str) -> PathBuf {
        let key = url
            .strip_prefix(&format!("{}/", TEST_BASE_URL))
            .expect("URL should point at local storage");
        self.storage_dir.path().join(key)
    }

    /// Entries left behind in the staging root.
    pub fn staging_entries(&self) -> usize {
        std::fs::read_dir(self.staging_dir.path()).unwrap().count()
    }
}

pub fn test_config(storage_dir: &TempDir, staging_dir: &TempDir) -> Config {
    Config {
        server_port: 0,
        environment: "test".to_string(),
        cors_origins: vec!["*".to_string()],
        jwt_secret: TEST_JWT_SECRET.to_string(),
        jwt_issuer: TEST_JWT_ISSUER.to_string(),
        database_url: None,
        db_max_connections: 1,
        db_timeout_seconds: 5,
        storage_backend: StorageBackend::Local,
        s3_bucket: None,
        s3_region: None,
        s3_endpoint: None,
        local_storage_path: Some(storage_dir.path().to_string_lossy().into_owned()),
        local_storage_base_url: Some(TEST_BASE_URL.to_string()),
        video_url_mode: VideoUrlMode::Public,
        presigned_url_ttl_secs: 3600,
        max_video_upload_bytes: 1024 * 1024,
        max_thumbnail_upload_bytes: 64 * 1024,
        ffmpeg_path: "ffmpeg".to_string(),
        ffprobe_path: "ffprobe".to_string(),
        upload_temp_dir: Some(staging_dir.path().to_path_buf()),
    }
}

/// Setup a test app whose probe reports `width` x `height`.
pub async fn setup_test_app(width: u32, height: u32) -> TestApp {
    setup_test_app_with(Arc::new(media::StubTools::new(width, height)), |_| {}).await
}

pub async fn setup_test_app_with(
    tools: Arc<dyn MediaTools>,
    customize: impl FnOnce(&mut Config),
) -> TestApp {
    tubely_api::telemetry::init_telemetry();

    let storage_dir = tempfile::tempdir().expect("Failed to create storage dir");
    let staging_dir = tempfile::tempdir().expect("Failed to create staging dir");
    let mut config = test_config(&storage_dir, &staging_dir);
    customize(&mut config);
    config.validate().expect("Test config should be valid");

    let repository = Arc::new(InMemoryVideoRepository::new());
    let storage = create_storage(&config)
        .await
        .expect("Failed to create local storage");
    let pipeline = UploadPipeline::new(
        repository.clone(),
        storage.clone(),
        tools,
        UploadPipelineConfig::from_config(&config),
    );
    let jwt = JwtService::new(&config.jwt_secret, config.jwt_issuer.clone());

    let state = Arc::new(AppState {
        config: config.clone(),
        repository: repository.clone(),
        storage,
        pipeline,
        jwt: jwt.clone(),
    });

    let app = routes::setup_routes(&config, state).expect("Failed to build routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        repository,
        jwt,
        storage_dir,
        staging_dir,
    }
}
