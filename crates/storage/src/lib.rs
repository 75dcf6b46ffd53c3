//! Object storage boundary.
//!
//! [`ObjectStore`] abstracts the hosted object store so workflows can be
//! exercised with fakes; [`S3ObjectStore`] is the production implementation
//! backed by any S3-compatible endpoint.

mod s3;

pub use s3::{S3ObjectStore, StorageConfig};

use async_trait::async_trait;

/// Error type for object store operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// An object already exists at the target key.
    #[error("Object already exists at '{0}'")]
    AlreadyExists(String),

    /// The store rejected or failed the request.
    #[error("Object store error: {0}")]
    Backend(String),
}

/// Abstraction over the hosted object store.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload a blob at `key` with the declared content type.
    ///
    /// Never overwrites: uploading to an occupied key fails with
    /// [`StorageError::AlreadyExists`] instead of silently replacing the
    /// object.
    async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError>;

    /// Publicly reachable URL for the blob at `key`.
    fn public_url(&self, key: &str) -> String;

    /// Delete the blob at `key`.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}
