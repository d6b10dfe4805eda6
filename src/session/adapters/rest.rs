//! Identity provider backed by the hosted authentication service.

use async_trait::async_trait;

use crate::{
    backend::BackendClient,
    session::{
        domain::{Identity, UserId},
        ports::{IdentityError, IdentityProvider, IdentityResult},
    },
};

/// Resolves the session bound to the client's access token.
#[derive(Debug, Clone)]
pub struct RestIdentityProvider {
    client: BackendClient,
}

impl RestIdentityProvider {
    /// Creates a provider over a configured backend client.
    #[must_use]
    pub const fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IdentityProvider for RestIdentityProvider {
    async fn current_user(&self) -> IdentityResult<Option<Identity>> {
        let user = self
            .client
            .current_user()
            .await
            .map_err(IdentityError::service)?;
        Ok(user.map(|user| {
            let mut identity = Identity::new(UserId::new(user.id.clone()));
            if let Some(email) = user.email.as_deref() {
                identity = identity.with_email(email);
            }
            if let Some(name) = user.display_name() {
                identity = identity.with_name(name);
            }
            identity
        }))
    }

    async fn sign_out(&self) -> IdentityResult<()> {
        self.client.sign_out().await.map_err(IdentityError::service)
    }
}
