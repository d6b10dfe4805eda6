//! REST repository for tasks.

use super::{
    TASKS_TABLE,
    models::{StatusPatch, TaskRow, row_to_task},
};
use crate::backend::{BackendClient, Filter};
use crate::session::domain::UserId;
use crate::task::{
    domain::{NewTask, Task, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Task repository over the hosted REST store.
#[derive(Debug, Clone)]
pub struct RestTaskRepository {
    client: BackendClient,
}

impl RestTaskRepository {
    /// Creates a repository using `client`.
    #[must_use]
    pub const fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TaskRepository for RestTaskRepository {
    async fn list_for_user(&self, user_id: &UserId) -> TaskRepositoryResult<Vec<Task>> {
        let rows: Vec<TaskRow> = self
            .client
            .select(
                TASKS_TABLE,
                &[
                    Filter::eq("user_id", user_id),
                    Filter::order_desc("created_at"),
                ],
            )
            .await
            .map_err(TaskRepositoryError::persistence)?;
        rows.into_iter().map(row_to_task).collect()
    }

    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let row: TaskRow = self
            .client
            .insert(TASKS_TABLE, task)
            .await
            .map_err(TaskRepositoryError::persistence)?;
        row_to_task(row)
    }

    async fn update_status(
        &self,
        id: &TaskId,
        status: TaskStatus,
        updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<()> {
        let patch = StatusPatch {
            status: status.as_str(),
            updated_at,
        };
        self.client
            .update(TASKS_TABLE, &[Filter::eq("id", id)], &patch)
            .await
            .map_err(TaskRepositoryError::persistence)
    }

    async fn delete(&self, id: &TaskId) -> TaskRepositoryResult<()> {
        self.client
            .delete(TASKS_TABLE, &[Filter::eq("id", id)])
            .await
            .map_err(TaskRepositoryError::persistence)
    }
}
