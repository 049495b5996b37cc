//! Configuration module
//!
//! Configuration is read from the environment (with `.env` support) once at startup.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{
    DEFAULT_PRESIGNED_URL_TTL_SECS, MAX_THUMBNAIL_UPLOAD_BYTES, MAX_VIDEO_UPLOAD_BYTES,
};
use crate::storage_types::StorageBackend;

const SERVER_PORT: u16 = 8091;
const MAX_CONNECTIONS: u32 = 10;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const JWT_ISSUER: &str = "tubely-access";

/// How the playable URL recorded on a video is built after upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoUrlMode {
    /// Plain object URL; the bucket (or local base URL) must be publicly readable.
    Public,
    /// Time-limited signed link minted at upload time.
    ///
    /// The signed link itself is stored on the record and is never refreshed, so
    /// `video_url` stops resolving `PRESIGNED_URL_TTL_SECS` after the upload.
    Presigned,
}

impl FromStr for VideoUrlMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "public" => Ok(VideoUrlMode::Public),
            "presigned" => Ok(VideoUrlMode::Presigned),
            _ => Err(anyhow::anyhow!("Invalid video URL mode: {}", s)),
        }
    }
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    // Record store
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    // Storage configuration
    pub storage_backend: StorageBackend,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO etc.)
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    pub video_url_mode: VideoUrlMode,
    pub presigned_url_ttl_secs: u64,
    // Upload pipeline
    pub max_video_upload_bytes: u64,
    pub max_thumbnail_upload_bytes: u64,
    pub ffmpeg_path: String,
    pub ffprobe_path: String,
    pub upload_temp_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }
        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable is required"))?;

        let storage_backend = env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "s3".to_string())
            .parse::<StorageBackend>()?;

        let video_url_mode = env::var("VIDEO_URL_MODE")
            .unwrap_or_else(|_| "public".to_string())
            .parse::<VideoUrlMode>()?;

        let config = Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            environment,
            cors_origins,
            jwt_secret,
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| JWT_ISSUER.to_string()),
            database_url: env::var("DATABASE_URL").ok().filter(|s| !s.is_empty()),
            db_max_connections: env_number("DB_MAX_CONNECTIONS", MAX_CONNECTIONS)?,
            db_timeout_seconds: env_number("DB_TIMEOUT_SECONDS", CONNECTION_TIMEOUT_SECS)?,
            storage_backend,
            s3_bucket: env::var("S3_BUCKET").ok(),
            s3_region: env::var("S3_REGION").or_else(|_| env::var("AWS_REGION")).ok(),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok(),
            local_storage_base_url: env::var("LOCAL_STORAGE_BASE_URL").ok(),
            video_url_mode,
            presigned_url_ttl_secs: env_number(
                "PRESIGNED_URL_TTL_SECS",
                DEFAULT_PRESIGNED_URL_TTL_SECS,
            )?,
            max_video_upload_bytes: env_number("MAX_VIDEO_UPLOAD_BYTES", MAX_VIDEO_UPLOAD_BYTES)?,
            max_thumbnail_upload_bytes: env_number(
                "MAX_THUMBNAIL_UPLOAD_BYTES",
                MAX_THUMBNAIL_UPLOAD_BYTES,
            )?,
            ffmpeg_path: env::var("FFMPEG_PATH").unwrap_or_else(|_| "ffmpeg".to_string()),
            ffprobe_path: env::var("FFPROBE_PATH").unwrap_or_else(|_| "ffprobe".to_string()),
            upload_temp_dir: env::var("UPLOAD_TEMP_DIR").ok().map(PathBuf::from),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.jwt_secret.len() < 32 {
            return Err(anyhow::anyhow!(
                "JWT_SECRET must be at least 32 characters long"
            ));
        }

        if let Some(ref url) = self.database_url {
            if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
                return Err(anyhow::anyhow!(
                    "DATABASE_URL must be a valid PostgreSQL connection string"
                ));
            }
        }

        if self.max_video_upload_bytes == 0 || self.max_video_upload_bytes > MAX_VIDEO_UPLOAD_BYTES
        {
            return Err(anyhow::anyhow!(
                "MAX_VIDEO_UPLOAD_BYTES must be between 1 and {}",
                MAX_VIDEO_UPLOAD_BYTES
            ));
        }

        match self.storage_backend {
            StorageBackend::S3 => {
                if self.s3_bucket.is_none() {
                    return Err(anyhow::anyhow!("S3_BUCKET is required for the s3 backend"));
                }
                if self.s3_region.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION is required for the s3 backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() || self.local_storage_base_url.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH and LOCAL_STORAGE_BASE_URL are required for the local backend"
                    ));
                }
            }
        }

        if self.video_url_mode == VideoUrlMode::Presigned && self.presigned_url_ttl_secs == 0 {
            return Err(anyhow::anyhow!(
                "PRESIGNED_URL_TTL_SECS must be positive when VIDEO_URL_MODE=presigned"
            ));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn presigned_url_ttl(&self) -> Duration {
        Duration::from_secs(self.presigned_url_ttl_secs)
    }

    pub fn upload_temp_dir(&self) -> PathBuf {
        self.upload_temp_dir.clone().unwrap_or_else(env::temp_dir)
    }
}

fn env_number<T: FromStr>(name: &str, default: T) -> Result<T, anyhow::Error> {
    parse_number(name, env::var(name).ok(), default)
}

/// Unset or blank falls back to `default`; anything else must parse.
fn parse_number<T: FromStr>(
    name: &str,
    value: Option<String>,
    default: T,
) -> Result<T, anyhow::Error> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| anyhow::anyhow!("{} must be a valid number, got '{}'", name, raw)),
    }
}
