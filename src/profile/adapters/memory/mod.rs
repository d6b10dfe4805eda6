//! In-memory profile rows and objects for tests and demos.

mod repository;
mod storage;

pub use repository::InMemoryProfileRepository;
pub use storage::InMemoryObjectStorage;
