//! Suggestion endpoint port.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for suggestion requests.
pub type SuggestionClientResult<T> = Result<T, SuggestionClientError>;

/// Turns a task title into suggested subtask titles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SuggestionClient: Send + Sync {
    /// Returns suggested subtask titles for `task_title`.
    async fn suggest(&self, task_title: &str) -> SuggestionClientResult<Vec<String>>;
}

/// Errors returned by suggestion clients.
#[derive(Debug, Clone, Error)]
pub enum SuggestionClientError {
    /// The endpoint answered with a non-success status.
    #[error("suggestion endpoint returned status {status}: {body}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },
    /// The endpoint could not be reached or its reply was unreadable.
    #[error("suggestion request failed: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl SuggestionClientError {
    /// Wraps a transport or decode error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
