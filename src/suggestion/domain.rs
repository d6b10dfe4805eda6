//! Request tokens and staged suggestion lists.

use std::fmt;

/// Identifies one suggestion request for a task.
///
/// Tokens only grow; a response is applied only while its token is still the
/// latest issued for the task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    /// Returns the first token.
    #[must_use]
    pub const fn first() -> Self {
        Self(1)
    }

    /// Returns the token following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Suggested subtask titles held for one task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagedSuggestions(Vec<String>);

impl StagedSuggestions {
    /// Stages `titles` in the order the endpoint returned them.
    #[must_use]
    pub const fn new(titles: Vec<String>) -> Self {
        Self(titles)
    }

    /// Returns `true` when `text` is staged.
    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        self.0.iter().any(|title| title == text)
    }

    /// Removes the first entry equal to `text`.
    ///
    /// Duplicates are indistinguishable, so only one occurrence goes.
    /// Returns `false` when nothing matched.
    pub fn remove_one(&mut self, text: &str) -> bool {
        let Some(position) = self.0.iter().position(|title| title == text) else {
            return false;
        };
        self.0.remove(position);
        true
    }

    /// Returns `true` when nothing is staged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the staged titles.
    #[must_use]
    pub fn titles(&self) -> &[String] {
        &self.0
    }
}
