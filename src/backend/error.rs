//! Error types for hosted backend requests.

use thiserror::Error;

/// Result type for backend requests.
pub type BackendResult<T> = Result<T, BackendError>;

/// Errors returned by [`super::BackendClient`].
#[derive(Debug, Error)]
pub enum BackendError {
    /// The request could not be sent or the response body could not be read.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status code.
    #[error("backend returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// A representation was requested but the backend returned no rows.
    #[error("backend returned no rows for {0}")]
    EmptyRepresentation(String),

    /// The client was configured with unusable values.
    #[error("invalid backend configuration: {0}")]
    Config(String),
}

impl BackendError {
    /// Returns the HTTP status for [`BackendError::Status`] errors.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) | Self::EmptyRepresentation(_) | Self::Config(_) => None,
        }
    }
}
