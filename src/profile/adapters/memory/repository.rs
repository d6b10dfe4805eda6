//! In-memory profile repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::profile::{
    domain::{PersistedProfileData, ProfileUpdate, UserProfile},
    ports::{ProfileRepository, ProfileRepositoryResult},
};
use crate::session::domain::UserId;

/// Profiles keyed by user id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileRepository {
    profiles: Arc<RwLock<HashMap<UserId, UserProfile>>>,
}

impl InMemoryProfileRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every stored profile.
    #[must_use]
    pub fn snapshot(&self) -> Vec<UserProfile> {
        self.profiles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find_by_user(&self, user_id: &UserId) -> ProfileRepositoryResult<Option<UserProfile>> {
        Ok(self
            .profiles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(user_id)
            .cloned())
    }

    async fn upsert(&self, update: &ProfileUpdate) -> ProfileRepositoryResult<()> {
        let mut profiles = self.profiles.write().unwrap_or_else(PoisonError::into_inner);
        let id = profiles
            .get(update.user_id())
            .map_or_else(|| uuid::Uuid::new_v4().to_string(), |existing| existing.id().to_owned());
        profiles.insert(
            update.user_id().clone(),
            UserProfile::from_persisted(PersistedProfileData {
                id,
                user_id: update.user_id().clone(),
                profile_picture_url: Some(update.profile_picture_url().to_owned()),
                updated_at: Some(update.updated_at()),
            }),
        );
        Ok(())
    }
}
