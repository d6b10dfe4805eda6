//! Taskpilot: async client for a hosted task manager.
//!
//! The crate keeps a signed-in user's tasks, their subtasks, AI-suggested
//! subtasks and profile picture in step with a hosted backend. Every write
//! is followed by a reload from the backend; the only purely local state is
//! the set of expanded tasks and the staged suggestions.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure types and rules with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the backend
//! - **Adapters**: In-memory and REST implementations of the ports
//! - **Services**: Client-side stores and workflows
//!
//! # Modules
//!
//! - [`session`]: Session guard run before any data is loaded
//! - [`task`]: Task and subtask stores with read-after-write reloads
//! - [`suggestion`]: Per-task suggestion staging with request tokens
//! - [`profile`]: Profile picture replacement
//! - [`alert`]: User-facing notifications
//! - [`backend`]: HTTP client for the hosted backend
//! - [`config`]: Layered connection settings
//! - [`telemetry`]: Log subscriber setup

pub mod alert;
pub mod backend;
pub mod config;
pub mod files;
pub mod profile;
pub mod session;
pub mod suggestion;
pub mod task;
pub mod telemetry;
