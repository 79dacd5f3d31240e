//! Task lifecycle service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{Housekeeping, TaskRepository, TaskRepositoryError, TaskTransition};
use crate::domain::{Error, Task, TaskCompletion, TaskDraft, TaskId, TaskListing, TaskStatus};

pub(crate) fn map_task_repository_error(error: TaskRepositoryError) -> Error {
    match error {
        TaskRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("task repository unavailable: {message}"))
        }
        TaskRepositoryError::Query { message } => {
            Error::internal(format!("task repository error: {message}"))
        }
        err @ (TaskRepositoryError::TaskNotFound { .. }
        | TaskRepositoryError::RoomNotFound { .. }) => Error::not_found(err.to_string()),
        err @ TaskRepositoryError::InvalidTransition { .. } => Error::conflict(err.to_string()),
    }
}

/// Task service implementing [`Housekeeping`].
#[derive(Clone)]
pub struct HousekeepingService<T> {
    tasks: Arc<T>,
    clock: Arc<dyn Clock>,
}

impl<T> HousekeepingService<T> {
    pub fn new(tasks: Arc<T>, clock: Arc<dyn Clock>) -> Self {
        Self { tasks, clock }
    }
}

#[async_trait]
impl<T> Housekeeping for HousekeepingService<T>
where
    T: TaskRepository,
{
    async fn create_task(&self, draft: TaskDraft) -> Result<Task, Error> {
        let task = self
            .tasks
            .create_task(&draft, self.clock.utc())
            .await
            .map_err(map_task_repository_error)?;
        info!(
            task_id = %task.id,
            room_id = %task.room_id,
            task_type = %task.task_type,
            "task created"
        );
        Ok(task)
    }

    async fn list_tasks(&self) -> Result<Vec<TaskListing>, Error> {
        self.tasks
            .list_tasks(None)
            .await
            .map_err(map_task_repository_error)
    }

    async fn start_task(&self, task_id: TaskId) -> Result<Task, Error> {
        let task = self
            .tasks
            .start_task(task_id)
            .await
            .map_err(map_task_repository_error)?;
        info!(%task_id, "task started");
        Ok(task)
    }

    async fn complete_task(&self, task_id: TaskId) -> Result<TaskCompletion, Error> {
        let completion = self
            .tasks
            .complete_task(task_id, self.clock.utc())
            .await
            .map_err(map_task_repository_error)?;
        info!(
            %task_id,
            room_id = %completion.room_id,
            room_released = completion.room_released,
            "task completed"
        );
        Ok(completion)
    }

    async fn update_task_status(
        &self,
        task_id: TaskId,
        status: TaskStatus,
    ) -> Result<TaskTransition, Error> {
        match status {
            TaskStatus::InProgress => self.start_task(task_id).await.map(TaskTransition::Started),
            TaskStatus::Completed => self
                .complete_task(task_id)
                .await
                .map(TaskTransition::Completed),
            TaskStatus::Pending => Err(Error::invalid_request(format!(
                "task status can only be set to {} or {}",
                TaskStatus::InProgress,
                TaskStatus::Completed
            ))),
        }
    }
}
