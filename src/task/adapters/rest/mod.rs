//! REST repositories backed by the hosted relational store.

mod models;
mod subtask;
mod task;

pub use subtask::RestSubtaskRepository;
pub use task::RestTaskRepository;

/// Table holding task rows.
pub const TASKS_TABLE: &str = "tasks";

/// Table holding subtask rows.
pub const SUBTASKS_TABLE: &str = "subtasks";
