//! Domain model for tasks and subtasks.
//!
//! Tasks belong to one user and carry a priority and a status; subtasks
//! belong to one task and carry a completion flag. Identifiers are assigned
//! by the backend and treated as opaque strings.

mod error;
mod ids;
mod subtask;
mod task;

pub use error::{ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::{SubtaskId, TaskId, Title};
pub use subtask::{NewSubtask, PersistedSubtaskData, Subtask};
pub use task::{NewTask, PersistedTaskData, Task, TaskPriority, TaskStatus};
