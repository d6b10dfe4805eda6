//! Tasks and subtasks of the signed-in user.
//!
//! Tasks are fetched for one user, newest first; each task's subtasks are
//! fetched separately, oldest first. Every write is followed by a reload
//! from the backend instead of a local patch, so the client never drifts
//! from the store. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Client-side stores in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
