//! Client-side stores for tasks and subtasks.
//!
//! Every mutation is followed by a reload from the repository; the stores
//! never patch their lists locally. The expanded set is the one piece of
//! purely local state.

mod expanded;
mod store;
mod subtasks;

pub use expanded::ExpandedTasks;
pub use store::{AddOutcome, TaskStore, TaskStoreError, TaskStoreResult};
pub use subtasks::{SubtaskStore, SubtaskStoreError, SubtaskStoreResult};
