//! Port for task persistence and task state transitions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{
    RoomId, Task, TaskCompletion, TaskDraft, TaskId, TaskListing, TaskStatus, TaskStatusCounts,
};

/// Errors raised by task repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskRepositoryError {
    /// Repository connection could not be established.
    #[error("task repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("task repository query failed: {message}")]
    Query { message: String },
    #[error("task {task_id} not found")]
    TaskNotFound { task_id: TaskId },
    #[error("room {room_id} not found")]
    RoomNotFound { room_id: RoomId },
    #[error("task {task_id} cannot move from {from} to {to}")]
    InvalidTransition {
        task_id: TaskId,
        from: TaskStatus,
        to: TaskStatus,
    },
}

impl TaskRepositoryError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert a pending task for an existing room.
    async fn create_task(
        &self,
        draft: &TaskDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Task, TaskRepositoryError>;

    /// Tasks newest first, at most `limit` when given.
    async fn list_tasks(&self, limit: Option<i64>) -> Result<Vec<TaskListing>, TaskRepositoryError>;

    /// Move a pending task to `in_progress`.
    async fn start_task(&self, task_id: TaskId) -> Result<Task, TaskRepositoryError>;

    /// Complete a task not yet completed, stamping `at`. A cleaning task also
    /// sets its room `available` in the same transaction.
    async fn complete_task(
        &self,
        task_id: TaskId,
        at: DateTime<Utc>,
    ) -> Result<TaskCompletion, TaskRepositoryError>;

    async fn count_by_status(&self) -> Result<TaskStatusCounts, TaskRepositoryError>;
}
