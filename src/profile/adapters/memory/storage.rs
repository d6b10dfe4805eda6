//! In-memory object storage.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::profile::{
    domain::ObjectPath,
    ports::{ObjectStorage, StorageError, StorageResult},
};

#[derive(Debug, Clone)]
struct StoredObject {
    content_type: String,
    len: usize,
}

/// Objects of one bucket held in memory.
#[derive(Debug, Clone)]
pub struct InMemoryObjectStorage {
    public_base: String,
    objects: Arc<RwLock<BTreeMap<ObjectPath, StoredObject>>>,
}

impl InMemoryObjectStorage {
    /// Creates an empty bucket whose public URLs start with `public_base`.
    #[must_use]
    pub fn new(public_base: impl Into<String>) -> Self {
        Self {
            public_base: public_base.into().trim_end_matches('/').to_owned(),
            objects: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Returns the stored paths in order.
    #[must_use]
    pub fn paths(&self) -> Vec<ObjectPath> {
        self.objects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    /// Returns the MIME type and size of a stored object.
    #[must_use]
    pub fn object(&self, path: &ObjectPath) -> Option<(String, usize)> {
        self.objects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .map(|object| (object.content_type.clone(), object.len))
    }
}

#[async_trait]
impl ObjectStorage for InMemoryObjectStorage {
    async fn upload(
        &self,
        path: &ObjectPath,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> StorageResult<()> {
        let mut objects = self.objects.write().unwrap_or_else(PoisonError::into_inner);
        if objects.contains_key(path) {
            return Err(StorageError::AlreadyExists(path.clone()));
        }
        objects.insert(
            path.clone(),
            StoredObject {
                content_type: content_type.to_owned(),
                len: bytes.len(),
            },
        );
        Ok(())
    }

    async fn remove(&self, path: &ObjectPath) -> StorageResult<()> {
        self.objects
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(path);
        Ok(())
    }

    fn public_url(&self, path: &ObjectPath) -> String {
        format!("{}/{path}", self.public_base)
    }
}
