//! Profile row persistence.

use crate::profile::domain::{ProfileUpdate, UserProfile};
use crate::session::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for profile repository operations.
pub type ProfileRepositoryResult<T> = Result<T, ProfileRepositoryError>;

/// Profile persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Returns the profile of `user_id`, if one exists.
    async fn find_by_user(&self, user_id: &UserId) -> ProfileRepositoryResult<Option<UserProfile>>;

    /// Creates the profile of the update's user or overwrites its picture
    /// fields.
    async fn upsert(&self, update: &ProfileUpdate) -> ProfileRepositoryResult<()>;
}

/// Errors returned by profile repositories.
#[derive(Debug, Clone, Error)]
pub enum ProfileRepositoryError {
    /// Persistence or decode failure.
    #[error("profile persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProfileRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
