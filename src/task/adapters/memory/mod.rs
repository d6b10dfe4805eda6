//! In-memory repositories for tests and demos.

mod subtask;
mod task;

pub use subtask::InMemorySubtaskRepository;
pub use task::InMemoryTaskRepository;
