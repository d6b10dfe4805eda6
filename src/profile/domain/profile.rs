//! Profile rows.

use crate::session::domain::UserId;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Field values of a stored profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProfileData {
    /// Row identifier.
    pub id: String,
    /// Owner of the profile.
    pub user_id: UserId,
    /// Public URL of the current picture.
    pub profile_picture_url: Option<String>,
    /// Last update time, if recorded.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Profile of one user. There is at most one per user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    id: String,
    user_id: UserId,
    profile_picture_url: Option<String>,
    updated_at: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// Rebuilds a profile from stored values.
    #[must_use]
    pub fn from_persisted(data: PersistedProfileData) -> Self {
        Self {
            id: data.id,
            user_id: data.user_id,
            profile_picture_url: data.profile_picture_url,
            updated_at: data.updated_at,
        }
    }

    /// Row identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Owner of the profile.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Public URL of the current picture.
    #[must_use]
    pub fn profile_picture_url(&self) -> Option<&str> {
        self.profile_picture_url.as_deref()
    }

    /// Last update time.
    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

/// Row written by a profile upsert, keyed by `user_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    user_id: UserId,
    profile_picture_url: String,
    updated_at: DateTime<Utc>,
}

impl ProfileUpdate {
    /// Points the profile of `user_id` at a new picture.
    #[must_use]
    pub const fn new(
        user_id: UserId,
        profile_picture_url: String,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            profile_picture_url,
            updated_at,
        }
    }

    /// Owner of the profile.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// New picture URL.
    #[must_use]
    pub fn profile_picture_url(&self) -> &str {
        &self.profile_picture_url
    }

    /// Update time.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
