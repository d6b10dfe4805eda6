//! Port contracts for profile rows and picture storage.

pub mod repository;
pub mod storage;

pub use repository::{ProfileRepository, ProfileRepositoryError, ProfileRepositoryResult};
pub use storage::{ObjectStorage, StorageError, StorageResult};

#[cfg(test)]
pub use repository::MockProfileRepository;
#[cfg(test)]
pub use storage::MockObjectStorage;
