//! Row models exchanged with the REST store.

use crate::session::domain::UserId;
use crate::task::domain::{
    PersistedSubtaskData, PersistedTaskData, Subtask, SubtaskId, Task, TaskId, TaskPriority,
    TaskStatus,
};
use crate::task::ports::TaskRepositoryError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Row of the `tasks` table.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskRow {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub priority: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Row of the `subtasks` table.
#[derive(Debug, Clone, Deserialize)]
pub struct SubtaskRow {
    pub id: String,
    pub task_id: String,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Patch body for status changes.
#[derive(Debug, Serialize)]
pub struct StatusPatch<'a> {
    pub status: &'a str,
    pub updated_at: DateTime<Utc>,
}

/// Patch body for completion toggles.
#[derive(Debug, Serialize)]
pub struct CompletedPatch {
    pub completed: bool,
}

pub fn row_to_task(row: TaskRow) -> Result<Task, TaskRepositoryError> {
    let TaskRow {
        id,
        user_id,
        title,
        priority: persisted_priority,
        status: persisted_status,
        created_at,
        updated_at,
    } = row;

    let priority = TaskPriority::try_from(persisted_priority.as_str())
        .map_err(TaskRepositoryError::persistence)?;
    let status = TaskStatus::try_from(persisted_status.as_str())
        .map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::new(id),
        user_id: UserId::new(user_id),
        title,
        priority,
        status,
        created_at,
        updated_at,
    }))
}

pub fn row_to_subtask(row: SubtaskRow) -> Subtask {
    Subtask::from_persisted(PersistedSubtaskData {
        id: SubtaskId::new(row.id),
        task_id: TaskId::new(row.task_id),
        title: row.title,
        completed: row.completed,
        created_at: row.created_at,
    })
}
