//! Driving port for housekeeping and maintenance tasks.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{Error, Task, TaskCompletion, TaskDraft, TaskId, TaskListing, TaskStatus};

/// Outcome of [`Housekeeping::update_task_status`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "transition", rename_all = "snake_case")]
pub enum TaskTransition {
    Started(Task),
    Completed(TaskCompletion),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Housekeeping: Send + Sync {
    async fn create_task(&self, draft: TaskDraft) -> Result<Task, Error>;

    /// Every task, newest first, with its room number.
    async fn list_tasks(&self) -> Result<Vec<TaskListing>, Error>;

    /// `pending -> in_progress`.
    async fn start_task(&self, task_id: TaskId) -> Result<Task, Error>;

    /// `pending | in_progress -> completed`. Completing a cleaning task frees
    /// the room.
    async fn complete_task(&self, task_id: TaskId) -> Result<TaskCompletion, Error>;

    /// Dispatch to [`Self::start_task`] or [`Self::complete_task`]. Any other
    /// target status is an invalid request.
    async fn update_task_status(
        &self,
        task_id: TaskId,
        status: TaskStatus,
    ) -> Result<TaskTransition, Error>;
}
