//! S3-compatible object store implementation.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_s3::primitives::ByteStream;

use crate::{ObjectStore, StorageError};

/// Default region for S3-compatible stores that ignore it anyway.
const DEFAULT_REGION: &str = "us-east-1";

/// Configuration for the S3-compatible object store.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Bucket holding all uploaded assets.
    pub bucket: String,
    /// Optional custom endpoint for S3-compatible hosted stores.
    pub endpoint: Option<String>,
    /// Region, defaults to `us-east-1`.
    pub region: String,
    /// Base URL under which objects are publicly served (no trailing slash).
    pub public_base_url: String,
}

impl StorageConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var              | Required | Default     |
    /// |----------------------|----------|-------------|
    /// | `STORAGE_BUCKET`     | **yes**  | --          |
    /// | `STORAGE_ENDPOINT`   | no       | --          |
    /// | `STORAGE_REGION`     | no       | `us-east-1` |
    /// | `STORAGE_PUBLIC_URL` | **yes**  | --          |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing; misconfiguration should
    /// fail at startup, not on the first upload.
    pub fn from_env() -> Self {
        let bucket = std::env::var("STORAGE_BUCKET").expect("STORAGE_BUCKET must be set");
        let public_base_url =
            std::env::var("STORAGE_PUBLIC_URL").expect("STORAGE_PUBLIC_URL must be set");

        Self {
            bucket,
            endpoint: std::env::var("STORAGE_ENDPOINT").ok(),
            region: std::env::var("STORAGE_REGION").unwrap_or_else(|_| DEFAULT_REGION.into()),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }
}

/// Production [`ObjectStore`] backed by an S3-compatible bucket.
#[derive(Clone)]
pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
    config: StorageConfig,
}

impl S3ObjectStore {
    /// Build a client from the ambient AWS credential chain plus `config`.
    pub async fn new(config: StorageConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));
        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint.clone());
        }
        let sdk_config = loader.load().await;

        // Hosted S3-compatible stores generally require path-style addressing.
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.endpoint.is_some())
            .build();

        Self {
            client: aws_sdk_s3::Client::from_conf(s3_config),
            config,
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let result = self
            .client
            .put_object()
            .bucket(&self.config.bucket)
            .key(key)
            .content_type(content_type)
            // Refuse to overwrite an existing object at this key.
            .if_none_match("*")
            .body(ByteStream::from(bytes))
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) => {
                if err.as_service_error().and_then(ProvideErrorMetadata::code)
                    == Some("PreconditionFailed")
                {
                    return Err(StorageError::AlreadyExists(key.to_string()));
                }
                Err(StorageError::Backend(
                    DisplayErrorContext(&err).to_string(),
                ))
            }
        }
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{key}", self.config.public_base_url)
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.client
            .delete_object()
            .bucket(&self.config.bucket)
            .key(key)
            .send()
            .await
            .map(|_| ())
            .map_err(|err| StorageError::Backend(DisplayErrorContext(&err).to_string()))
    }
}
