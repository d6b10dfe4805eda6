//! In-memory task repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Arc, RwLock};

use crate::session::domain::UserId;
use crate::task::{
    domain::{NewTask, PersistedTaskData, Task, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Tasks are kept in insertion order, which doubles as creation order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<Vec<Task>>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every stored task regardless of owner, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the lock is poisoned.
    pub fn snapshot(&self) -> TaskRepositoryResult<Vec<Task>> {
        let tasks = self.tasks.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(tasks.clone())
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn list_for_user(&self, user_id: &UserId) -> TaskRepositoryResult<Vec<Task>> {
        let tasks = self.tasks.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(tasks
            .iter()
            .rev()
            .filter(|task| task.user_id() == user_id)
            .cloned()
            .collect())
    }

    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let mut tasks = self.tasks.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let stored = Task::from_persisted(PersistedTaskData {
            id: TaskId::generate(),
            user_id: task.user_id().clone(),
            title: task.title().as_str().to_owned(),
            priority: task.priority(),
            status: task.status(),
            created_at: Utc::now(),
            updated_at: None,
        });
        tasks.push(stored.clone());
        Ok(stored)
    }

    async fn update_status(
        &self,
        id: &TaskId,
        status: TaskStatus,
        updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<()> {
        let mut tasks = self.tasks.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let task = tasks
            .iter_mut()
            .find(|task| task.id() == id)
            .ok_or_else(|| TaskRepositoryError::NotFound(id.clone()))?;
        task.set_status(status, updated_at);
        Ok(())
    }

    async fn delete(&self, id: &TaskId) -> TaskRepositoryResult<()> {
        let mut tasks = self.tasks.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let before = tasks.len();
        tasks.retain(|task| task.id() != id);
        if tasks.len() == before {
            return Err(TaskRepositoryError::NotFound(id.clone()));
        }
        Ok(())
    }
}
