//! Profile repository over the backend's REST interface.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::PROFILES_TABLE;
use crate::backend::{BackendClient, Filter};
use crate::profile::{
    domain::{PersistedProfileData, ProfileUpdate, UserProfile},
    ports::{ProfileRepository, ProfileRepositoryError, ProfileRepositoryResult},
};
use crate::session::domain::UserId;

#[derive(Debug, Deserialize)]
struct ProfileRow {
    id: String,
    user_id: String,
    #[serde(default)]
    profile_picture_url: Option<String>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

impl From<ProfileRow> for UserProfile {
    fn from(row: ProfileRow) -> Self {
        Self::from_persisted(PersistedProfileData {
            id: row.id,
            user_id: UserId::new(row.user_id),
            profile_picture_url: row.profile_picture_url,
            updated_at: row.updated_at,
        })
    }
}

/// Reads and upserts `user_profiles` rows.
#[derive(Debug, Clone)]
pub struct RestProfileRepository {
    client: BackendClient,
}

impl RestProfileRepository {
    /// Creates a repository over a configured backend client.
    #[must_use]
    pub const fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProfileRepository for RestProfileRepository {
    async fn find_by_user(&self, user_id: &UserId) -> ProfileRepositoryResult<Option<UserProfile>> {
        let rows: Vec<ProfileRow> = self
            .client
            .select(PROFILES_TABLE, &[Filter::eq("user_id", user_id)])
            .await
            .map_err(ProfileRepositoryError::persistence)?;
        Ok(rows.into_iter().next().map(UserProfile::from))
    }

    async fn upsert(&self, update: &ProfileUpdate) -> ProfileRepositoryResult<()> {
        self.client
            .upsert(PROFILES_TABLE, "user_id", update)
            .await
            .map_err(ProfileRepositoryError::persistence)
    }
}
