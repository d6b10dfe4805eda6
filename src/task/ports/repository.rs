//! Repository ports for tasks and subtasks.

use crate::session::domain::UserId;
use crate::task::domain::{NewSubtask, NewTask, Subtask, SubtaskId, Task, TaskId, TaskStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Result type for subtask repository operations.
pub type SubtaskRepositoryResult<T> = Result<T, SubtaskRepositoryError>;

/// Task persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Returns every task owned by `user_id`, newest first.
    async fn list_for_user(&self, user_id: &UserId) -> TaskRepositoryResult<Vec<Task>>;

    /// Stores a new task and returns the stored record.
    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<Task>;

    /// Sets the status and update timestamp of a task.
    ///
    /// # Errors
    ///
    /// Implementations that can detect it return
    /// [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update_status(
        &self,
        id: &TaskId,
        status: TaskStatus,
        updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<()>;

    /// Deletes a task. Its subtasks are left untouched.
    async fn delete(&self, id: &TaskId) -> TaskRepositoryResult<()>;
}

/// Subtask persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubtaskRepository: Send + Sync {
    /// Returns every subtask of `task_id`, oldest first.
    async fn list_for_task(&self, task_id: &TaskId) -> SubtaskRepositoryResult<Vec<Subtask>>;

    /// Stores a new subtask and returns the stored record.
    async fn insert(&self, subtask: &NewSubtask) -> SubtaskRepositoryResult<Subtask>;

    /// Sets the completion flag of a subtask.
    async fn set_completed(&self, id: &SubtaskId, completed: bool) -> SubtaskRepositoryResult<()>;

    /// Deletes one subtask.
    async fn delete(&self, id: &SubtaskId) -> SubtaskRepositoryResult<()>;

    /// Deletes every subtask of `task_id`.
    async fn delete_for_task(&self, task_id: &TaskId) -> SubtaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Errors returned by subtask repository implementations.
#[derive(Debug, Clone, Error)]
pub enum SubtaskRepositoryError {
    /// The subtask was not found.
    #[error("subtask not found: {0}")]
    NotFound(SubtaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SubtaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
