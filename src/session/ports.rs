//! Identity provider port.

use super::domain::Identity;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for identity provider operations.
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Session queries against the authentication service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns the signed-in user, or `None` without a session.
    async fn current_user(&self) -> IdentityResult<Option<Identity>>;

    /// Ends the current session.
    async fn sign_out(&self) -> IdentityResult<()>;
}

/// Errors returned by identity providers.
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    /// The authentication service could not be reached or answered with an
    /// error.
    #[error("identity service error: {0}")]
    Service(Arc<dyn std::error::Error + Send + Sync>),
}

impl IdentityError {
    /// Wraps a service error.
    pub fn service(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Service(Arc::new(err))
    }
}
