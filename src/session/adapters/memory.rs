//! In-memory identity provider for tests and demos.

use async_trait::async_trait;
use std::sync::{Arc, PoisonError, RwLock};

use crate::session::{
    domain::Identity,
    ports::{IdentityProvider, IdentityResult},
};

/// Identity provider holding at most one signed-in user.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentityProvider {
    current: Arc<RwLock<Option<Identity>>>,
}

impl InMemoryIdentityProvider {
    /// Creates a provider with nobody signed in.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a provider with `identity` signed in.
    #[must_use]
    pub fn signed_in(identity: Identity) -> Self {
        Self {
            current: Arc::new(RwLock::new(Some(identity))),
        }
    }

    /// Signs `identity` in, replacing any current user.
    pub fn sign_in(&self, identity: Identity) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(identity);
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn current_user(&self) -> IdentityResult<Option<Identity>> {
        Ok(self
            .current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    async fn sign_out(&self) -> IdentityResult<()> {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
