//! REST repository for subtasks.

use super::{
    SUBTASKS_TABLE,
    models::{CompletedPatch, SubtaskRow, row_to_subtask},
};
use crate::backend::{BackendClient, Filter};
use crate::task::{
    domain::{NewSubtask, Subtask, SubtaskId, TaskId},
    ports::{SubtaskRepository, SubtaskRepositoryError, SubtaskRepositoryResult},
};
use async_trait::async_trait;

/// Subtask repository over the hosted REST store.
#[derive(Debug, Clone)]
pub struct RestSubtaskRepository {
    client: BackendClient,
}

impl RestSubtaskRepository {
    /// Creates a repository using `client`.
    #[must_use]
    pub const fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SubtaskRepository for RestSubtaskRepository {
    async fn list_for_task(&self, task_id: &TaskId) -> SubtaskRepositoryResult<Vec<Subtask>> {
        let rows: Vec<SubtaskRow> = self
            .client
            .select(
                SUBTASKS_TABLE,
                &[
                    Filter::eq("task_id", task_id),
                    Filter::order_asc("created_at"),
                ],
            )
            .await
            .map_err(SubtaskRepositoryError::persistence)?;
        Ok(rows.into_iter().map(row_to_subtask).collect())
    }

    async fn insert(&self, subtask: &NewSubtask) -> SubtaskRepositoryResult<Subtask> {
        let row: SubtaskRow = self
            .client
            .insert(SUBTASKS_TABLE, subtask)
            .await
            .map_err(SubtaskRepositoryError::persistence)?;
        Ok(row_to_subtask(row))
    }

    async fn set_completed(&self, id: &SubtaskId, completed: bool) -> SubtaskRepositoryResult<()> {
        self.client
            .update(
                SUBTASKS_TABLE,
                &[Filter::eq("id", id)],
                &CompletedPatch { completed },
            )
            .await
            .map_err(SubtaskRepositoryError::persistence)
    }

    async fn delete(&self, id: &SubtaskId) -> SubtaskRepositoryResult<()> {
        self.client
            .delete(SUBTASKS_TABLE, &[Filter::eq("id", id)])
            .await
            .map_err(SubtaskRepositoryError::persistence)
    }

    async fn delete_for_task(&self, task_id: &TaskId) -> SubtaskRepositoryResult<()> {
        self.client
            .delete(SUBTASKS_TABLE, &[Filter::eq("task_id", task_id)])
            .await
            .map_err(SubtaskRepositoryError::persistence)
    }
}
