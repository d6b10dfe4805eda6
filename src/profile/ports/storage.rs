//! Picture object storage.

use crate::profile::domain::ObjectPath;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for object storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Object storage scoped to the picture bucket.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Stores a new object. An existing object at `path` is never replaced.
    async fn upload(&self, path: &ObjectPath, content_type: &str, bytes: Vec<u8>)
    -> StorageResult<()>;

    /// Deletes an object. Deleting a missing object is not an error.
    async fn remove(&self, path: &ObjectPath) -> StorageResult<()>;

    /// Public URL of an object. No request is made.
    fn public_url(&self, path: &ObjectPath) -> String;
}

/// Errors returned by object storage.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// An object already exists at the path.
    #[error("object {0} already exists")]
    AlreadyExists(ObjectPath),
    /// The storage service failed.
    #[error("storage error: {0}")]
    Service(Arc<dyn std::error::Error + Send + Sync>),
}

impl StorageError {
    /// Wraps a service error.
    pub fn service(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Service(Arc::new(err))
    }
}
