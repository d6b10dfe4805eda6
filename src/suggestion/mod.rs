//! Suggested subtasks for a task.
//!
//! A suggestion endpoint turns a task title into candidate subtask titles.
//! Candidates are staged in memory against their task until the user saves
//! one as a real subtask or dismisses it; nothing is written before that.
//!
//! - Request tokens and staged lists in [`domain`]
//! - The endpoint contract in [`ports`]
//! - Endpoint adapters in [`adapters`]
//! - The per-task workflow in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
