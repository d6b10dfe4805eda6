//! The task list of the signed-in user.

use super::{ExpandedTasks, SubtaskStore, SubtaskStoreError};
use crate::session::domain::UserId;
use crate::task::{
    domain::{NewTask, Task, TaskId, TaskPriority, TaskStatus, Title},
    ports::{SubtaskRepository, TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;

/// Result of an add request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome<T> {
    /// The record was stored and the list reloaded.
    Added(T),
    /// The title was blank; nothing was written.
    Skipped,
}

/// Errors returned by [`TaskStore`] operations.
#[derive(Debug, Error)]
pub enum TaskStoreError {
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Subtask operation failed.
    #[error(transparent)]
    Subtasks(#[from] SubtaskStoreError),
    /// No user's tasks have been loaded yet.
    #[error("task store has no owner; call load first")]
    NotLoaded,
}

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

#[derive(Debug, Default)]
struct TaskListState {
    owner: Option<UserId>,
    tasks: Vec<Task>,
}

/// Tasks of one user, their subtasks, and which tasks are expanded.
///
/// Every mutation ends in a full reload of the task list, including each
/// task's subtasks.
pub struct TaskStore<R, S, C>
where
    R: TaskRepository,
    S: SubtaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    subtasks: SubtaskStore<S>,
    expanded: ExpandedTasks,
    clock: Arc<C>,
    state: Arc<RwLock<TaskListState>>,
}

impl<R, S, C> Clone for TaskStore<R, S, C>
where
    R: TaskRepository,
    S: SubtaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            subtasks: self.subtasks.clone(),
            expanded: self.expanded.clone(),
            clock: Arc::clone(&self.clock),
            state: Arc::clone(&self.state),
        }
    }
}

impl<R, S, C> TaskStore<R, S, C>
where
    R: TaskRepository,
    S: SubtaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates an empty store.
    #[must_use]
    pub fn new(repository: Arc<R>, subtasks: SubtaskStore<S>, clock: Arc<C>) -> Self {
        Self {
            repository,
            subtasks,
            expanded: ExpandedTasks::new(),
            clock,
            state: Arc::new(RwLock::new(TaskListState::default())),
        }
    }

    /// Returns the subtask store shared with this task list.
    #[must_use]
    pub const fn subtasks(&self) -> &SubtaskStore<S> {
        &self.subtasks
    }

    /// Returns the expanded-row set.
    #[must_use]
    pub const fn expanded(&self) -> &ExpandedTasks {
        &self.expanded
    }

    /// Returns the loaded tasks, newest first.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .tasks
            .clone()
    }

    /// Replaces the list with every task of `user_id`, then loads each
    /// task's subtasks with one request per task. Subtask lists of tasks
    /// that are no longer returned are dropped.
    ///
    /// A failed subtask fetch is logged and leaves that task's previous
    /// subtask list in place.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Repository`] when the task fetch fails; the
    /// previous list is kept.
    #[tracing::instrument(skip_all, fields(user_id = %user_id))]
    pub async fn load(&self, user_id: &UserId) -> TaskStoreResult<()> {
        let tasks = self
            .repository
            .list_for_user(user_id)
            .await
            .inspect_err(|err| tracing::warn!(error = %err, "failed to load tasks"))?;
        tracing::debug!(count = tasks.len(), "tasks reloaded");

        self.subtasks.bind_owner(user_id.clone());
        let task_ids: Vec<TaskId> = tasks.iter().map(|task| task.id().clone()).collect();
        self.subtasks.retain_tasks(&task_ids);
        {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            state.owner = Some(user_id.clone());
            state.tasks.clone_from(&tasks);
        }

        for task in &tasks {
            if let Err(err) = self.subtasks.load(task.id()).await {
                tracing::debug!(task_id = %task.id(), error = %err, "keeping stale subtasks");
            }
        }
        Ok(())
    }

    async fn reload(&self) -> TaskStoreResult<()> {
        let owner = self.owner()?;
        self.load(&owner).await
    }

    fn owner(&self) -> TaskStoreResult<UserId> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .owner
            .clone()
            .ok_or(TaskStoreError::NotLoaded)
    }

    /// Adds a pending task, then reloads the list.
    ///
    /// A blank title is skipped without any remote call.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotLoaded`] before [`Self::load`], or a
    /// repository error when the insert or reload fails.
    #[tracing::instrument(skip_all, fields(priority = priority.as_str()))]
    pub async fn add(&self, title: &str, priority: TaskPriority) -> TaskStoreResult<AddOutcome<Task>> {
        let Ok(valid_title) = Title::new(title) else {
            tracing::debug!("blank task title, nothing to add");
            return Ok(AddOutcome::Skipped);
        };
        let owner = self.owner()?;

        let stored = self
            .repository
            .insert(&NewTask::new(owner, valid_title, priority))
            .await
            .inspect_err(|err| tracing::warn!(error = %err, "failed to add task"))?;
        tracing::info!(task_id = %stored.id(), "task added");

        self.reload().await?;
        Ok(AddOutcome::Added(stored))
    }

    /// Sets the status of a task, then reloads the list.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the update or reload fails.
    #[tracing::instrument(skip_all, fields(task_id = %task_id, status = status.as_str()))]
    pub async fn set_status(&self, task_id: &TaskId, status: TaskStatus) -> TaskStoreResult<()> {
        self.repository
            .update_status(task_id, status, self.clock.utc())
            .await
            .inspect_err(|err| tracing::warn!(error = %err, "failed to update task status"))?;
        tracing::info!("task status updated");
        self.reload().await
    }

    /// Deletes a task and its subtasks, then reloads the list.
    ///
    /// Subtasks go first so a failure never leaves orphans behind a deleted
    /// task. The cost is that a failed task delete leaves the task without
    /// its subtasks; the list is reloaded in that case too so the held state
    /// matches the backend.
    ///
    /// # Errors
    ///
    /// Returns an error when either delete or the reload fails.
    #[tracing::instrument(skip_all, fields(task_id = %task_id))]
    pub async fn remove(&self, task_id: &TaskId) -> TaskStoreResult<()> {
        self.subtasks.remove_all(task_id).await?;
        if let Err(err) = self.repository.delete(task_id).await {
            tracing::warn!(error = %err, "failed to delete task after its subtasks");
            if let Err(reload_err) = self.reload().await {
                tracing::debug!(error = %reload_err, "keeping stale list after failed delete");
            }
            return Err(err.into());
        }
        self.expanded.collapse(task_id);
        tracing::info!("task deleted");
        self.reload().await
    }
}
