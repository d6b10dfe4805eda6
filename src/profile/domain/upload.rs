//! Picture uploads and their storage paths.

use super::ProfileDomainError;
use crate::session::domain::UserId;
use chrono::{DateTime, Utc};
use std::fmt;

/// A file chosen for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl ImageUpload {
    /// Wraps a file's name, MIME type and contents.
    #[must_use]
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// File name as chosen by the user.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Declared MIME type.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Consumes the upload, returning the file contents.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Fails unless the MIME type is in the `image/` family.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileDomainError::NotAnImage`] for any other type.
    pub fn ensure_image(&self) -> Result<(), ProfileDomainError> {
        if self.content_type.starts_with("image/") {
            Ok(())
        } else {
            Err(ProfileDomainError::NotAnImage(self.content_type.clone()))
        }
    }

    /// Text after the last `.` of the file name, or the whole name when it
    /// has no dot.
    #[must_use]
    pub fn extension(&self) -> &str {
        self.file_name
            .rsplit_once('.')
            .map_or(self.file_name.as_str(), |(_, extension)| extension)
    }
}

/// Location of an object inside the picture bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectPath(String);

impl ObjectPath {
    /// Wraps a raw bucket-relative path.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Builds `{user_id}/{unix_millis}.{extension}` so uploads never collide
    /// across users and rarely within one.
    #[must_use]
    pub fn for_upload(user_id: &UserId, at: DateTime<Utc>, extension: &str) -> Self {
        Self(format!("{user_id}/{}.{extension}", at.timestamp_millis()))
    }

    /// Recovers the object path from a public URL: its last two segments.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileDomainError::NoObjectPath`] when the URL has fewer
    /// than two non-empty trailing segments.
    pub fn from_public_url(url: &str) -> Result<Self, ProfileDomainError> {
        let mut segments = url.rsplit('/');
        match (segments.next(), segments.next()) {
            (Some(file), Some(folder)) if !file.is_empty() && !folder.is_empty() => {
                Ok(Self(format!("{folder}/{file}")))
            }
            _ => Err(ProfileDomainError::NoObjectPath(url.to_owned())),
        }
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
