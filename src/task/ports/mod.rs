//! Port contracts for task and subtask persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by the task stores.

pub mod repository;

pub use repository::{
    SubtaskRepository, SubtaskRepositoryError, SubtaskRepositoryResult, TaskRepository,
    TaskRepositoryError, TaskRepositoryResult,
};

#[cfg(test)]
pub use repository::{MockSubtaskRepository, MockTaskRepository};
