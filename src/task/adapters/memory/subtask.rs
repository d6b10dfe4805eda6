//! In-memory subtask repository.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{NewSubtask, PersistedSubtaskData, Subtask, SubtaskId, TaskId},
    ports::{SubtaskRepository, SubtaskRepositoryError, SubtaskRepositoryResult},
};

/// Thread-safe in-memory subtask repository, kept in creation order.
#[derive(Debug, Clone, Default)]
pub struct InMemorySubtaskRepository {
    subtasks: Arc<RwLock<Vec<Subtask>>>,
}

impl InMemorySubtaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every stored subtask, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`SubtaskRepositoryError::Persistence`] when the lock is
    /// poisoned.
    pub fn snapshot(&self) -> SubtaskRepositoryResult<Vec<Subtask>> {
        Ok(self.read()?.clone())
    }

    fn read(&self) -> SubtaskRepositoryResult<RwLockReadGuard<'_, Vec<Subtask>>> {
        self.subtasks.read().map_err(|err| {
            SubtaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> SubtaskRepositoryResult<RwLockWriteGuard<'_, Vec<Subtask>>> {
        self.subtasks.write().map_err(|err| {
            SubtaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl SubtaskRepository for InMemorySubtaskRepository {
    async fn list_for_task(&self, task_id: &TaskId) -> SubtaskRepositoryResult<Vec<Subtask>> {
        Ok(self
            .read()?
            .iter()
            .filter(|subtask| subtask.task_id() == task_id)
            .cloned()
            .collect())
    }

    async fn insert(&self, subtask: &NewSubtask) -> SubtaskRepositoryResult<Subtask> {
        let stored = Subtask::from_persisted(PersistedSubtaskData {
            id: SubtaskId::generate(),
            task_id: subtask.task_id().clone(),
            title: subtask.title().as_str().to_owned(),
            completed: false,
            created_at: Utc::now(),
        });
        self.write()?.push(stored.clone());
        Ok(stored)
    }

    async fn set_completed(&self, id: &SubtaskId, completed: bool) -> SubtaskRepositoryResult<()> {
        let mut subtasks = self.write()?;
        let subtask = subtasks
            .iter_mut()
            .find(|subtask| subtask.id() == id)
            .ok_or_else(|| SubtaskRepositoryError::NotFound(id.clone()))?;
        subtask.set_completed(completed);
        Ok(())
    }

    async fn delete(&self, id: &SubtaskId) -> SubtaskRepositoryResult<()> {
        let mut subtasks = self.write()?;
        let before = subtasks.len();
        subtasks.retain(|subtask| subtask.id() != id);
        if subtasks.len() == before {
            return Err(SubtaskRepositoryError::NotFound(id.clone()));
        }
        Ok(())
    }

    async fn delete_for_task(&self, task_id: &TaskId) -> SubtaskRepositoryResult<()> {
        self.write()?.retain(|subtask| subtask.task_id() != task_id);
        Ok(())
    }
}
