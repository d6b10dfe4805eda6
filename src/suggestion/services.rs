//! Per-task suggestion workflow.

use crate::alert::Alerts;
use crate::suggestion::{
    domain::{RequestToken, StagedSuggestions},
    ports::SuggestionClient,
};
use crate::task::{
    domain::{Subtask, TaskId},
    ports::SubtaskRepository,
    services::{ExpandedTasks, SubtaskStore, SubtaskStoreError},
};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;

/// Alert raised when the suggestion endpoint fails.
pub const GENERATE_FAILED_MESSAGE: &str = "Failed to generate subtasks. Please try again.";

/// Result of a [`SuggestionWorkflow::generate`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// Suggestions were staged against the task.
    Staged(Vec<String>),
    /// The endpoint failed; the user was alerted and nothing is staged.
    Failed,
    /// A newer request for the same task was issued; the reply was dropped.
    Superseded,
}

/// Errors returned by [`SuggestionWorkflow::save`].
#[derive(Debug, Error)]
pub enum SuggestionError {
    /// The text is not staged for the task.
    #[error("suggestion `{text}` is not staged for task {task_id}")]
    NotStaged {
        /// Task the suggestion was looked up under.
        task_id: TaskId,
        /// Text that was not found.
        text: String,
    },
    /// Persisting the subtask failed.
    #[error(transparent)]
    Subtasks(#[from] SubtaskStoreError),
}

/// Result type for suggestion workflow operations.
pub type SuggestionResult<T> = Result<T, SuggestionError>;

#[derive(Debug, Default)]
struct SuggestionState {
    staged: HashMap<TaskId, StagedSuggestions>,
    generating: HashSet<TaskId>,
    latest: HashMap<TaskId, RequestToken>,
    last_issued: Option<RequestToken>,
}

impl SuggestionState {
    fn begin(&mut self, task_id: &TaskId) -> RequestToken {
        let token = self
            .last_issued
            .map_or_else(RequestToken::first, RequestToken::next);
        self.last_issued = Some(token);
        self.latest.insert(task_id.clone(), token);
        self.generating.insert(task_id.clone());
        self.staged.remove(task_id);
        token
    }

    /// Ends the request if it is still the latest one for the task.
    fn finish(&mut self, task_id: &TaskId, token: RequestToken) -> bool {
        if self.latest.get(task_id) != Some(&token) {
            return false;
        }
        self.latest.remove(task_id);
        self.generating.remove(task_id);
        true
    }
}

/// Stages suggested subtasks per task and saves them on request.
pub struct SuggestionWorkflow<C, S>
where
    C: SuggestionClient,
    S: SubtaskRepository,
{
    client: Arc<C>,
    subtasks: SubtaskStore<S>,
    expanded: ExpandedTasks,
    alerts: Arc<dyn Alerts>,
    state: Arc<RwLock<SuggestionState>>,
}

impl<C, S> Clone for SuggestionWorkflow<C, S>
where
    C: SuggestionClient,
    S: SubtaskRepository,
{
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            subtasks: self.subtasks.clone(),
            expanded: self.expanded.clone(),
            alerts: Arc::clone(&self.alerts),
            state: Arc::clone(&self.state),
        }
    }
}

impl<C, S> SuggestionWorkflow<C, S>
where
    C: SuggestionClient,
    S: SubtaskRepository,
{
    /// Creates a workflow saving into `subtasks` and expanding rows in
    /// `expanded`.
    #[must_use]
    pub fn new(
        client: Arc<C>,
        subtasks: SubtaskStore<S>,
        expanded: ExpandedTasks,
        alerts: Arc<dyn Alerts>,
    ) -> Self {
        Self {
            client,
            subtasks,
            expanded,
            alerts,
            state: Arc::new(RwLock::new(SuggestionState::default())),
        }
    }

    /// Requests suggestions for a task and stages them.
    ///
    /// Prior suggestions for the task are cleared first. On success the task
    /// is expanded; on failure the user is alerted. The generating flag is
    /// cleared in both cases unless a newer request for the task has started,
    /// in which case this reply is discarded.
    #[tracing::instrument(skip_all, fields(task_id = %task_id))]
    pub async fn generate(&self, task_id: &TaskId, task_title: &str) -> GenerateOutcome {
        let token = self
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .begin(task_id);
        tracing::debug!(%token, "requesting suggestions");

        let reply = self.client.suggest(task_title).await;

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if !state.finish(task_id, token) {
            tracing::debug!(%token, "discarding superseded suggestions");
            return GenerateOutcome::Superseded;
        }
        match reply {
            Ok(titles) => {
                tracing::info!(count = titles.len(), "suggestions staged");
                state
                    .staged
                    .insert(task_id.clone(), StagedSuggestions::new(titles.clone()));
                drop(state);
                self.expanded.expand(task_id);
                GenerateOutcome::Staged(titles)
            }
            Err(err) => {
                drop(state);
                tracing::warn!(error = %err, "failed to generate suggestions");
                self.alerts.alert(GENERATE_FAILED_MESSAGE);
                GenerateOutcome::Failed
            }
        }
    }

    /// Saves one staged suggestion as an incomplete subtask titled exactly
    /// `text`, then removes one matching entry from the staged list.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestionError::NotStaged`] when `text` is not staged for
    /// the task, or [`SuggestionError::Subtasks`] when the insert or reload
    /// fails; the staged entry is kept in both cases.
    #[tracing::instrument(skip_all, fields(task_id = %task_id))]
    pub async fn save(
        &self,
        task_id: &TaskId,
        text: &str,
    ) -> SuggestionResult<Subtask> {
        if !self.is_staged(task_id, text) {
            return Err(SuggestionError::NotStaged {
                task_id: task_id.clone(),
                text: text.to_owned(),
            });
        }
        let saved = self.subtasks.add_verbatim(task_id, text).await?;
        if !self.dismiss(task_id, text) {
            tracing::debug!("staged entry was dismissed while saving");
        }
        Ok(saved)
    }

    /// Drops one staged entry equal to `text` without saving it.
    ///
    /// Returns `false` when nothing matched.
    #[must_use]
    pub fn dismiss(&self, task_id: &TaskId, text: &str) -> bool {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let Some(staged) = state.staged.get_mut(task_id) else {
            return false;
        };
        let removed = staged.remove_one(text);
        if staged.is_empty() {
            state.staged.remove(task_id);
        }
        removed
    }

    /// Drops every staged suggestion and pending request of a removed task.
    pub fn forget(&self, task_id: &TaskId) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.staged.remove(task_id);
        state.generating.remove(task_id);
        state.latest.remove(task_id);
    }

    /// Returns the staged suggestions for a task, in endpoint order.
    #[must_use]
    pub fn staged(&self, task_id: &TaskId) -> Vec<String> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .staged
            .get(task_id)
            .map(|staged| staged.titles().to_vec())
            .unwrap_or_default()
    }

    /// Returns `true` while a request for the task is outstanding.
    #[must_use]
    pub fn is_generating(&self, task_id: &TaskId) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .generating
            .contains(task_id)
    }

    fn is_staged(&self, task_id: &TaskId, text: &str) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .staged
            .get(task_id)
            .is_some_and(|staged| staged.contains(text))
    }
}
