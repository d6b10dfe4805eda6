//! User-facing notifications.
//!
//! Workflows report recoverable failures and confirmations through
//! [`Alerts`] rather than returning them, so the caller stays usable after
//! any remote failure.

use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

/// Sink for blocking user-facing messages.
pub trait Alerts: Send + Sync {
    /// Shows `message` to the user.
    fn alert(&self, message: &str);
}

/// Keeps every alert in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingAlerts {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingAlerts {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the alerts raised so far, oldest first.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Alerts for RecordingAlerts {
    fn alert(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_owned());
    }
}

/// Writes alerts to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleAlerts;

impl Alerts for ConsoleAlerts {
    fn alert(&self, message: &str) {
        let mut stdout = std::io::stdout().lock();
        if let Err(err) = writeln!(stdout, "{message}") {
            tracing::warn!(error = %err, "failed to write alert");
        }
    }
}
