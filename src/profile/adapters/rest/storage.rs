//! Picture storage over the backend's object store.

use async_trait::async_trait;

use crate::backend::BackendClient;
use crate::profile::{
    domain::ObjectPath,
    ports::{ObjectStorage, StorageError, StorageResult},
};

/// Objects in one storage bucket.
#[derive(Debug, Clone)]
pub struct RestObjectStorage {
    client: BackendClient,
    bucket: String,
}

impl RestObjectStorage {
    /// Creates storage for `bucket`.
    #[must_use]
    pub fn new(client: BackendClient, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl ObjectStorage for RestObjectStorage {
    async fn upload(
        &self,
        path: &ObjectPath,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> StorageResult<()> {
        self.client
            .upload_object(&self.bucket, path.as_str(), content_type, bytes)
            .await
            .map_err(|err| match err.status() {
                Some(409) => StorageError::AlreadyExists(path.clone()),
                _ => StorageError::service(err),
            })
    }

    async fn remove(&self, path: &ObjectPath) -> StorageResult<()> {
        self.client
            .remove_objects(&self.bucket, &[path.as_str()])
            .await
            .map_err(StorageError::service)
    }

    fn public_url(&self, path: &ObjectPath) -> String {
        self.client.public_object_url(&self.bucket, path.as_str())
    }
}

