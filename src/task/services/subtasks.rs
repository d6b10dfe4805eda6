//! Per-task subtask lists.

use super::AddOutcome;
use crate::session::domain::UserId;
use crate::task::{
    domain::{NewSubtask, Subtask, SubtaskId, TaskId, Title},
    ports::{SubtaskRepository, SubtaskRepositoryError},
};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;

/// Errors returned by [`SubtaskStore`] operations.
#[derive(Debug, Error)]
pub enum SubtaskStoreError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] SubtaskRepositoryError),
    /// No owner has been bound, so new subtasks cannot be attributed.
    #[error("subtask store has no owner; load tasks first")]
    NoOwner,
}

/// Result type for subtask store operations.
pub type SubtaskStoreResult<T> = Result<T, SubtaskStoreError>;

#[derive(Debug, Default)]
struct SubtaskState {
    owner: Option<UserId>,
    lists: HashMap<TaskId, Vec<Subtask>>,
}

/// Subtask lists keyed by task id. Clones share the same lists.
///
/// Mutations reload only the affected task's list.
pub struct SubtaskStore<S>
where
    S: SubtaskRepository,
{
    repository: Arc<S>,
    state: Arc<RwLock<SubtaskState>>,
}

impl<S> Clone for SubtaskStore<S>
where
    S: SubtaskRepository,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            state: Arc::clone(&self.state),
        }
    }
}

impl<S> SubtaskStore<S>
where
    S: SubtaskRepository,
{
    /// Creates an empty store.
    #[must_use]
    pub fn new(repository: Arc<S>) -> Self {
        Self {
            repository,
            state: Arc::new(RwLock::new(SubtaskState::default())),
        }
    }

    /// Sets the user new subtasks are attributed to.
    pub fn bind_owner(&self, user_id: UserId) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .owner = Some(user_id);
    }

    /// Replaces the list of `task_id` with a fresh fetch.
    ///
    /// # Errors
    ///
    /// Returns [`SubtaskStoreError::Repository`] when the fetch fails; the
    /// previous list is kept.
    #[tracing::instrument(skip_all, fields(task_id = %task_id))]
    pub async fn load(&self, task_id: &TaskId) -> SubtaskStoreResult<()> {
        let subtasks = self
            .repository
            .list_for_task(task_id)
            .await
            .inspect_err(|err| tracing::warn!(error = %err, "failed to load subtasks"))?;
        tracing::debug!(count = subtasks.len(), "subtasks reloaded");
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .lists
            .insert(task_id.clone(), subtasks);
        Ok(())
    }

    /// Adds an incomplete subtask, then reloads the task's list.
    ///
    /// A blank title is skipped without any remote call.
    ///
    /// # Errors
    ///
    /// Returns [`SubtaskStoreError::NoOwner`] before any owner is bound, or
    /// [`SubtaskStoreError::Repository`] when the insert or reload fails.
    #[tracing::instrument(skip_all, fields(task_id = %task_id))]
    pub async fn add(
        &self,
        task_id: &TaskId,
        title: &str,
    ) -> SubtaskStoreResult<AddOutcome<Subtask>> {
        let Ok(valid_title) = Title::new(title) else {
            tracing::debug!("blank subtask title, nothing to add");
            return Ok(AddOutcome::Skipped);
        };
        Ok(AddOutcome::Added(self.insert(task_id, valid_title).await?))
    }

    /// Adds an incomplete subtask titled exactly `text`, then reloads the
    /// task's list. Used for generated text, which is stored as received.
    ///
    /// # Errors
    ///
    /// Returns [`SubtaskStoreError::NoOwner`] before any owner is bound, or
    /// [`SubtaskStoreError::Repository`] when the insert or reload fails.
    #[tracing::instrument(skip_all, fields(task_id = %task_id))]
    pub async fn add_verbatim(&self, task_id: &TaskId, text: &str) -> SubtaskStoreResult<Subtask> {
        self.insert(task_id, Title::verbatim(text)).await
    }

    async fn insert(&self, task_id: &TaskId, title: Title) -> SubtaskStoreResult<Subtask> {
        let owner = self
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .owner
            .clone()
            .ok_or(SubtaskStoreError::NoOwner)?;

        let new_subtask = NewSubtask::new(task_id.clone(), owner, title);
        let stored = self
            .repository
            .insert(&new_subtask)
            .await
            .inspect_err(|err| tracing::warn!(error = %err, "failed to add subtask"))?;
        tracing::info!(subtask_id = %stored.id(), "subtask added");

        self.load(task_id).await?;
        Ok(stored)
    }

    /// Writes `!current_completed`, then reloads the task's list.
    ///
    /// # Errors
    ///
    /// Returns [`SubtaskStoreError::Repository`] when the update or reload
    /// fails.
    #[tracing::instrument(skip_all, fields(subtask_id = %subtask_id, task_id = %task_id))]
    pub async fn toggle_completed(
        &self,
        subtask_id: &SubtaskId,
        task_id: &TaskId,
        current_completed: bool,
    ) -> SubtaskStoreResult<()> {
        self.repository
            .set_completed(subtask_id, !current_completed)
            .await
            .inspect_err(|err| tracing::warn!(error = %err, "failed to toggle subtask"))?;
        self.load(task_id).await
    }

    /// Deletes a subtask, then reloads the task's list.
    ///
    /// # Errors
    ///
    /// Returns [`SubtaskStoreError::Repository`] when the delete or reload
    /// fails.
    #[tracing::instrument(skip_all, fields(subtask_id = %subtask_id, task_id = %task_id))]
    pub async fn remove(&self, subtask_id: &SubtaskId, task_id: &TaskId) -> SubtaskStoreResult<()> {
        self.repository
            .delete(subtask_id)
            .await
            .inspect_err(|err| tracing::warn!(error = %err, "failed to delete subtask"))?;
        self.load(task_id).await
    }

    /// Deletes every subtask of `task_id` and drops its local list.
    ///
    /// # Errors
    ///
    /// Returns [`SubtaskStoreError::Repository`] when the delete fails; the
    /// local list is kept in that case.
    pub async fn remove_all(&self, task_id: &TaskId) -> SubtaskStoreResult<()> {
        self.repository
            .delete_for_task(task_id)
            .await
            .inspect_err(|err| {
                tracing::warn!(error = %err, %task_id, "failed to delete subtasks");
            })?;
        self.forget(task_id);
        Ok(())
    }

    /// Drops the local list of `task_id`.
    pub fn forget(&self, task_id: &TaskId) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .lists
            .remove(task_id);
    }

    /// Drops the local lists of every task not in `task_ids`.
    pub fn retain_tasks(&self, task_ids: &[TaskId]) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .lists
            .retain(|task_id, _| task_ids.contains(task_id));
    }

    /// Returns the loaded subtasks of `task_id`, oldest first.
    #[must_use]
    pub fn subtasks(&self, task_id: &TaskId) -> Vec<Subtask> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .lists
            .get(task_id)
            .cloned()
            .unwrap_or_default()
    }
}
