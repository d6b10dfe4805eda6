//! Expanded/collapsed state of task rows.

use crate::task::domain::TaskId;
use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock};

/// Set of task ids whose subtasks are shown. Clones share the same set.
#[derive(Debug, Clone, Default)]
pub struct ExpandedTasks {
    ids: Arc<RwLock<HashSet<TaskId>>>,
}

impl ExpandedTasks {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the state of `task_id` and returns whether it is now expanded.
    pub fn toggle(&self, task_id: &TaskId) -> bool {
        let mut ids = self.ids.write().unwrap_or_else(PoisonError::into_inner);
        if ids.remove(task_id) {
            false
        } else {
            ids.insert(task_id.clone());
            true
        }
    }

    /// Marks `task_id` as expanded.
    pub fn expand(&self, task_id: &TaskId) {
        self.ids
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(task_id.clone());
    }

    /// Marks `task_id` as collapsed.
    pub fn collapse(&self, task_id: &TaskId) {
        self.ids
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(task_id);
    }

    /// Returns whether `task_id` is expanded.
    #[must_use]
    pub fn is_expanded(&self, task_id: &TaskId) -> bool {
        self.ids
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(task_id)
    }
}
