use crate::keys::validate_key;
use crate::traits::{ByteReader, Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use http::Method;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::buffered::BufWriter;
use object_store::path::Path;
use object_store::signer::Signer;
use object_store::Error as ObjectStoreError;
use object_store::{
    Attribute, AttributeValue, Attributes, ObjectStoreExt, PutOptions, PutPayload,
    Result as ObjectResult,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;

/// S3 storage implementation
#[derive(Clone)]
pub struct S3Storage {
    store: AmazonS3,
    bucket: String,
    region: String,
    endpoint_url: Option<String>, // Custom endpoint for S3-compatible providers
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    ///
    /// Credentials come from the standard AWS environment variables.
    pub fn new(bucket: String, region: String, endpoint_url: Option<String>) -> StorageResult<Self> {
        let mut builder = AmazonS3Builder::from_env()
            .with_region(region.clone())
            .with_bucket_name(bucket.clone());

        if let Some(ref endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(S3Storage {
            store,
            bucket,
            region,
            endpoint_url,
        })
    }

    fn content_type_attributes(content_type: &str) -> Attributes {
        let mut attributes = Attributes::new();
        attributes.insert(
            Attribute::ContentType,
            AttributeValue::from(content_type.to_string()),
        );
        attributes
    }
}

/// Public URL for an S3 object.
///
/// AWS: `https://{bucket}.s3.{region}.amazonaws.com/{key}`. With a custom
/// endpoint the path-style form `{endpoint}/{bucket}/{key}` is used.
fn object_url_for(bucket: &str, region: &str, endpoint_url: Option<&str>, key: &str) -> String {
    match endpoint_url {
        Some(endpoint) => format!("{}/{}/{}", endpoint.trim_end_matches('/'), bucket, key),
        None => format!("https://{}.s3.{}.amazonaws.com/{}", bucket, region, key),
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn put(
        &self,
        storage_key: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<String> {
        validate_key(storage_key)?;
        let size = data.len() as u64;
        let location = Path::from(storage_key.to_string());
        let options = PutOptions {
            attributes: Self::content_type_attributes(content_type),
            ..Default::default()
        };
        let start = std::time::Instant::now();

        let result: ObjectResult<_> = object_store::ObjectStore::put_opts(
            &self.store,
            &location,
            PutPayload::from(Bytes::from(data)),
            options,
        )
        .await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %storage_key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 put failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %storage_key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 put successful"
        );

        Ok(self.object_url(storage_key))
    }

    async fn put_stream(
        &self,
        storage_key: &str,
        content_type: &str,
        content_length: Option<u64>,
        mut reader: ByteReader,
    ) -> StorageResult<String> {
        validate_key(storage_key)?;
        let location = Path::from(storage_key.to_string());
        let start = std::time::Instant::now();

        // BufWriter switches to a multipart upload once the buffer fills, so
        // large artifacts are never held in memory in full.
        let store: Arc<dyn object_store::ObjectStore> = Arc::new(self.store.clone());
        let mut writer = BufWriter::new(store, location)
            .with_attributes(Self::content_type_attributes(content_type));

        let copied = match tokio::io::copy(&mut reader, &mut writer).await {
            Ok(n) => n,
            Err(e) => {
                if let Err(abort_err) = writer.abort().await {
                    tracing::debug!(error = %abort_err, key = %storage_key, "Failed to abort S3 upload");
                }
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %storage_key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 stream upload failed"
                );
                return Err(StorageError::UploadFailed(e.to_string()));
            }
        };

        writer.shutdown().await.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %storage_key,
                size_bytes = copied,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 stream upload failed to complete"
            );
            StorageError::UploadFailed(e.to_string())
        })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %storage_key,
            size_bytes = copied,
            declared_size_bytes = ?content_length,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 stream upload successful"
        );

        Ok(self.object_url(storage_key))
    }

    async fn presigned_url(
        &self,
        storage_key: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        validate_key(storage_key)?;
        let location = Path::from(storage_key.to_string());
        let url_result: ObjectResult<_> = self
            .store
            .signed_url(Method::GET, &location, expires_in)
            .await;

        let url = url_result
            .map_err(|e| {
                tracing::error!(error = %e, key = %storage_key, "S3 URL signing failed");
                StorageError::SigningFailed(e.to_string())
            })?
            .to_string();

        Ok(url)
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        validate_key(storage_key)?;
        let start = std::time::Instant::now();
        let location = Path::from(storage_key.to_string());

        let result: ObjectResult<_> = self.store.delete(&location).await;

        match result {
            Ok(_) | Err(ObjectStoreError::NotFound { .. }) => {}
            Err(e) => {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %storage_key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 delete failed"
                );
                return Err(StorageError::DeleteFailed(e.to_string()));
            }
        }

        tracing::info!(
            bucket = %self.bucket,
            key = %storage_key,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 delete successful"
        );

        Ok(())
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        validate_key(storage_key)?;
        let location = Path::from(storage_key.to_string());
        match self.store.head(&location).await {
            Ok(_) => Ok(true),
            Err(ObjectStoreError::NotFound { .. }) => Ok(false),
            Err(e) => Err(StorageError::BackendError(e.to_string())),
        }
    }

    fn object_url(&self, storage_key: &str) -> String {
        object_url_for(
            &self.bucket,
            &self.region,
            self.endpoint_url.as_deref(),
            storage_key,
        )
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
