//! Canned suggestions for tests and demos.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::suggestion::ports::{SuggestionClient, SuggestionClientError, SuggestionClientResult};

/// Answers from a fixed table keyed by task title.
///
/// Unknown titles get an empty list; titles registered with
/// [`StaticSuggestionClient::fail_for`] get a rejection.
#[derive(Debug, Clone, Default)]
pub struct StaticSuggestionClient {
    answers: Arc<RwLock<HashMap<String, Result<Vec<String>, u16>>>>,
}

impl StaticSuggestionClient {
    /// Creates a client with no canned answers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `task_title` with `titles`.
    #[must_use]
    pub fn with_answer<I, T>(self, task_title: &str, titles: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.answer(task_title, titles);
        self
    }

    /// Rejects `task_title` with `status`.
    #[must_use]
    pub fn fail_for(self, task_title: &str, status: u16) -> Self {
        self.reject(task_title, status);
        self
    }

    /// Sets the answer for `task_title` on this client and its clones.
    pub fn answer<I, T>(&self, task_title: &str, titles: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.answers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                task_title.to_owned(),
                Ok(titles.into_iter().map(Into::into).collect()),
            );
    }

    /// Makes `task_title` fail with `status` on this client and its clones.
    pub fn reject(&self, task_title: &str, status: u16) {
        self.answers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(task_title.to_owned(), Err(status));
    }
}

#[async_trait]
impl SuggestionClient for StaticSuggestionClient {
    async fn suggest(&self, task_title: &str) -> SuggestionClientResult<Vec<String>> {
        let answer = self
            .answers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(task_title)
            .cloned();
        match answer {
            Some(Ok(titles)) => Ok(titles),
            Some(Err(status)) => Err(SuggestionClientError::Rejected {
                status,
                body: String::new(),
            }),
            None => Ok(Vec::new()),
        }
    }
}
