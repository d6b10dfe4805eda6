//! Hosted backend adapters for profiles and picture storage.

mod repository;
mod storage;

pub use repository::RestProfileRepository;
pub use storage::RestObjectStorage;

/// Table holding one profile row per user.
pub const PROFILES_TABLE: &str = "user_profiles";
