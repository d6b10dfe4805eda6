//! Profile domain errors.

use thiserror::Error;

/// Errors raised while validating profile input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProfileDomainError {
    /// The selected file is not an image.
    #[error("content type `{0}` is not an image")]
    NotAnImage(String),
    /// A picture URL does not contain an object path.
    #[error("`{0}` does not name a stored object")]
    NoObjectPath(String),
}
