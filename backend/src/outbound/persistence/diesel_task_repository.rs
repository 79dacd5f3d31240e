//! SQLite-backed `TaskRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{TaskRepository, TaskRepositoryError};
use crate::domain::{
    RoomId, RoomStatus, Task, TaskCompletion, TaskDraft, TaskId, TaskListing, TaskStatus,
    TaskStatusCounts, TaskType,
};

use super::diesel_error_mapping::{TxError, map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewTaskRow, TaskRow};
use super::pool::{DbPool, PoolError, immediate_transaction};
use super::schema::{rooms, tasks};

/// Diesel-backed implementation of the task repository port.
#[derive(Clone)]
pub struct DieselTaskRepository {
    pool: DbPool,
}

impl DieselTaskRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TaskRepositoryError {
    map_basic_pool_error(error, TaskRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> TaskRepositoryError {
    map_basic_diesel_error(
        error,
        TaskRepositoryError::query,
        TaskRepositoryError::connection,
    )
}

fn row_to_task(row: TaskRow) -> Result<Task, TaskRepositoryError> {
    Task::try_from(row).map_err(TaskRepositoryError::query)
}

fn parse_status(raw: &str) -> Result<TaskStatus, TaskRepositoryError> {
    raw.parse::<TaskStatus>()
        .map_err(|err| TaskRepositoryError::query(err.to_string()))
}

type Tx<T> = Result<T, TxError<TaskRepositoryError>>;

/// Load the status of `task_id` inside a transaction, rejecting unknown ids.
async fn locate(
    conn: &mut super::pool::SqliteConn,
    task_id: TaskId,
) -> Tx<(i32, String, TaskStatus)> {
    let found: Option<(i32, String, String)> = tasks::table
        .find(task_id.get())
        .select((tasks::room_id, tasks::task_type, tasks::status))
        .first(conn)
        .await
        .optional()?;
    let Some((room_id, task_type, status)) = found else {
        return Err(TxError::Rejected(TaskRepositoryError::TaskNotFound { task_id }));
    };
    let status = parse_status(&status).map_err(TxError::Rejected)?;
    Ok((room_id, task_type, status))
}

#[async_trait]
impl TaskRepository for DieselTaskRepository {
    async fn create_task(
        &self,
        draft: &TaskDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Task, TaskRepositoryError> {
        let room_id = draft.room_id();
        let new_row = NewTaskRow {
            room_id: room_id.get(),
            task_type: draft.task_type().as_str(),
            description: draft.description(),
            status: TaskStatus::Pending.as_str(),
            assigned_to: draft.assigned_to(),
            created_at: created_at.naive_utc(),
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = immediate_transaction::<_, TxError<TaskRepositoryError>, _>(
            &mut conn,
            |conn| {
                async move {
                    let rooms_found: i64 = rooms::table
                        .filter(rooms::id.eq(room_id.get()))
                        .count()
                        .get_result(conn)
                        .await?;
                    if rooms_found == 0 {
                        return Err(TxError::Rejected(TaskRepositoryError::RoomNotFound {
                            room_id,
                        }));
                    }
                    let row = diesel::insert_into(tasks::table)
                        .values(&new_row)
                        .returning(TaskRow::as_returning())
                        .get_result(conn)
                        .await?;
                    Ok(row)
                }
                .scope_boxed()
            },
        )
        .await
        .map_err(|err| err.into_repository_error(map_diesel_error))?;
        row_to_task(row)
    }

    async fn list_tasks(
        &self,
        limit: Option<i64>,
    ) -> Result<Vec<TaskListing>, TaskRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = tasks::table
            .left_join(rooms::table)
            .order((tasks::created_at.desc(), tasks::id.desc()))
            .select((TaskRow::as_select(), rooms::room_number.nullable()))
            .into_boxed();
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        let rows: Vec<(TaskRow, Option<String>)> =
            query.load(&mut conn).await.map_err(map_diesel_error)?;
        rows.into_iter()
            .map(|(row, room_number)| {
                Ok(TaskListing {
                    task: row_to_task(row)?,
                    room_number,
                })
            })
            .collect()
    }

    async fn start_task(&self, task_id: TaskId) -> Result<Task, TaskRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = immediate_transaction::<_, TxError<TaskRepositoryError>, _>(
            &mut conn,
            |conn| {
                async move {
                    let (_, _, status) = locate(conn, task_id).await?;
                    if !status.can_start() {
                        return Err(TxError::Rejected(TaskRepositoryError::InvalidTransition {
                            task_id,
                            from: status,
                            to: TaskStatus::InProgress,
                        }));
                    }
                    let row = diesel::update(tasks::table.find(task_id.get()))
                        .set(tasks::status.eq(TaskStatus::InProgress.as_str()))
                        .returning(TaskRow::as_returning())
                        .get_result(conn)
                        .await?;
                    Ok(row)
                }
                .scope_boxed()
            },
        )
        .await
        .map_err(|err| err.into_repository_error(map_diesel_error))?;
        row_to_task(row)
    }

    async fn complete_task(
        &self,
        task_id: TaskId,
        at: DateTime<Utc>,
    ) -> Result<TaskCompletion, TaskRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        immediate_transaction::<_, TxError<TaskRepositoryError>, _>(&mut conn, |conn| {
            async move {
                let (room_id, task_type, status) = locate(conn, task_id).await?;
                if !status.can_complete() {
                    return Err(TxError::Rejected(TaskRepositoryError::InvalidTransition {
                        task_id,
                        from: status,
                        to: TaskStatus::Completed,
                    }));
                }
                diesel::update(tasks::table.find(task_id.get()))
                    .set((
                        tasks::status.eq(TaskStatus::Completed.as_str()),
                        tasks::completed_at.eq(Some(at.naive_utc())),
                    ))
                    .execute(conn)
                    .await?;

                let room_released = if TaskType::from(task_type).releases_room() {
                    diesel::update(rooms::table.find(room_id))
                        .set(rooms::status.eq(RoomStatus::Available.as_str()))
                        .execute(conn)
                        .await?
                        > 0
                } else {
                    false
                };

                Ok(TaskCompletion {
                    task_id,
                    room_id: RoomId::new(room_id),
                    room_released,
                })
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| err.into_repository_error(map_diesel_error))
    }

    async fn count_by_status(&self) -> Result<TaskStatusCounts, TaskRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(String, i64)> = tasks::table
            .group_by(tasks::status)
            .select((tasks::status, count_star()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let pairs = rows
            .into_iter()
            .map(|(status, count)| {
                Ok((parse_status(&status)?, u64::try_from(count).unwrap_or_default()))
            })
            .collect::<Result<Vec<_>, TaskRepositoryError>>()?;
        Ok(TaskStatusCounts::from_pairs(pairs))
    }
}
