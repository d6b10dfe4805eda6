//! Subtask entity.

use super::{SubtaskId, TaskId, Title};
use crate::session::domain::UserId;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Values for a subtask that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewSubtask {
    task_id: TaskId,
    user_id: UserId,
    title: Title,
    completed: bool,
}

impl NewSubtask {
    /// Creates an incomplete subtask of `task_id`.
    #[must_use]
    pub const fn new(task_id: TaskId, user_id: UserId, title: Title) -> Self {
        Self {
            task_id,
            user_id,
            title,
            completed: false,
        }
    }

    /// Returns the parent task.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the owner.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &Title {
        &self.title
    }
}

/// A stored subtask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subtask {
    id: SubtaskId,
    task_id: TaskId,
    title: String,
    completed: bool,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a stored subtask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSubtaskData {
    /// Stored identifier.
    pub id: SubtaskId,
    /// Parent task.
    pub task_id: TaskId,
    /// Stored title.
    pub title: String,
    /// Completion flag.
    pub completed: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Subtask {
    /// Reconstructs a subtask from stored values.
    #[must_use]
    pub fn from_persisted(data: PersistedSubtaskData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            title: data.title,
            completed: data.completed,
            created_at: data.created_at,
        }
    }

    /// Returns the subtask identifier.
    #[must_use]
    pub const fn id(&self) -> &SubtaskId {
        &self.id
    }

    /// Returns the parent task.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns whether the subtask is done.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.completed
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub(crate) fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }
}
