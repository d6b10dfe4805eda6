//! Suggestion client backed by a hosted edge function.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::backend::{BackendClient, BackendError};
use crate::suggestion::ports::{SuggestionClient, SuggestionClientError, SuggestionClientResult};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SuggestionRequest<'a> {
    task_title: &'a str,
}

#[derive(Deserialize)]
struct SuggestionResponse {
    subtasks: Vec<String>,
}

/// Posts task titles to the configured suggestion function.
#[derive(Debug, Clone)]
pub struct RestSuggestionClient {
    client: BackendClient,
    function: String,
}

impl RestSuggestionClient {
    /// Creates a client calling `function` through `client`.
    #[must_use]
    pub fn new(client: BackendClient, function: impl Into<String>) -> Self {
        Self {
            client,
            function: function.into(),
        }
    }
}

#[async_trait]
impl SuggestionClient for RestSuggestionClient {
    async fn suggest(&self, task_title: &str) -> SuggestionClientResult<Vec<String>> {
        let response: SuggestionResponse = self
            .client
            .invoke_function(&self.function, &SuggestionRequest { task_title })
            .await
            .map_err(|err| match err {
                BackendError::Status { status, body } => {
                    SuggestionClientError::Rejected { status, body }
                }
                other => SuggestionClientError::transport(other),
            })?;
        Ok(response.subtasks)
    }
}
