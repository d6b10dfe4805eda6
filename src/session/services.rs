//! Session guard run when a view is activated.

use crate::session::{
    domain::{GuardDecision, Identity},
    ports::IdentityProvider,
};
use std::sync::{Arc, PoisonError, RwLock};

/// Checks for an authenticated session and remembers the identity.
#[derive(Clone)]
pub struct SessionGuard<P>
where
    P: IdentityProvider,
{
    provider: Arc<P>,
    identity: Arc<RwLock<Option<Identity>>>,
}

impl<P> SessionGuard<P>
where
    P: IdentityProvider,
{
    /// Creates a guard with no stored identity.
    #[must_use]
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            identity: Arc::new(RwLock::new(None)),
        }
    }

    /// Queries the provider once. Errors are treated as "no session".
    #[tracing::instrument(skip_all)]
    pub async fn check(&self) -> GuardDecision {
        let decision = match self.provider.current_user().await {
            Ok(Some(identity)) => {
                tracing::debug!(user_id = %identity.id(), "session found");
                GuardDecision::Proceed(identity)
            }
            Ok(None) => {
                tracing::info!("no session, redirecting to login");
                GuardDecision::RedirectToLogin
            }
            Err(err) => {
                tracing::warn!(error = %err, "session check failed, redirecting to login");
                GuardDecision::RedirectToLogin
            }
        };

        let stored = match &decision {
            GuardDecision::Proceed(identity) => Some(identity.clone()),
            GuardDecision::RedirectToLogin => None,
        };
        *self.identity.write().unwrap_or_else(PoisonError::into_inner) = stored;
        decision
    }

    /// Returns the identity stored by the last successful check.
    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        self.identity
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Ends the session. The stored identity is cleared even when the
    /// provider fails; the failure is only logged.
    #[tracing::instrument(skip_all)]
    pub async fn sign_out(&self) {
        if let Err(err) = self.provider.sign_out().await {
            tracing::warn!(error = %err, "sign-out failed");
        }
        *self.identity.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
