//! Domain model for user profiles and picture uploads.

mod error;
mod profile;
mod upload;

pub use error::ProfileDomainError;
pub use profile::{PersistedProfileData, ProfileUpdate, UserProfile};
pub use upload::{ImageUpload, ObjectPath};
