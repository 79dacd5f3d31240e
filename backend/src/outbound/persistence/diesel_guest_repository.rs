//! SQLite-backed `GuestRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{GuestRepository, GuestRepositoryError};
use crate::domain::{
    CheckInDraft, CheckoutOutcome, Guest, GuestId, GuestListing, GuestStatus, GuestStay,
    RecentCheckIn, RoomId, RoomStatus, TaskDraft, TaskId, TaskStatus,
};

use super::diesel_error_mapping::{
    TxError, is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{GuestRow, NewGuestRow, NewTaskRow};
use super::pool::{DbPool, PoolError, immediate_transaction};
use super::schema::{guests, rooms, tasks};

/// Diesel-backed implementation of the guest repository port.
#[derive(Clone)]
pub struct DieselGuestRepository {
    pool: DbPool,
}

impl DieselGuestRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> GuestRepositoryError {
    map_basic_pool_error(error, GuestRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> GuestRepositoryError {
    map_basic_diesel_error(
        error,
        GuestRepositoryError::query,
        GuestRepositoryError::connection,
    )
}

fn row_to_guest(row: GuestRow) -> Result<Guest, GuestRepositoryError> {
    Guest::try_from(row).map_err(GuestRepositoryError::query)
}

type Tx<T> = Result<T, TxError<GuestRepositoryError>>;

fn rejected<T>(error: GuestRepositoryError) -> Tx<T> {
    Err(TxError::Rejected(error))
}

#[async_trait]
impl GuestRepository for DieselGuestRepository {
    async fn check_in(&self, draft: &CheckInDraft) -> Result<Guest, GuestRepositoryError> {
        let room_id = draft.room_id();
        let new_row = NewGuestRow {
            name: draft.name(),
            phone: draft.phone(),
            email: draft.email(),
            check_in: draft.check_in(),
            check_out: draft.check_out(),
            room_id: room_id.get(),
            status: GuestStatus::Active.as_str(),
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = immediate_transaction::<_, TxError<GuestRepositoryError>, _>(
            &mut conn,
            |conn| {
                async move {
                    let status: Option<String> = rooms::table
                        .find(room_id.get())
                        .select(rooms::status)
                        .first(conn)
                        .await
                        .optional()?;
                    let Some(status) = status else {
                        return rejected(GuestRepositoryError::RoomNotFound { room_id });
                    };
                    let status = status.parse::<RoomStatus>().map_err(|err| {
                        TxError::Rejected(GuestRepositoryError::query(err.to_string()))
                    })?;
                    if status != RoomStatus::Available {
                        return rejected(GuestRepositoryError::RoomUnavailable { room_id, status });
                    }

                    let row = diesel::insert_into(guests::table)
                        .values(&new_row)
                        .returning(GuestRow::as_returning())
                        .get_result(conn)
                        .await
                        .map_err(|err| {
                            if is_unique_violation(&err) {
                                TxError::Rejected(GuestRepositoryError::RoomUnavailable {
                                    room_id,
                                    status: RoomStatus::Occupied,
                                })
                            } else {
                                TxError::Diesel(err)
                            }
                        })?;
                    diesel::update(rooms::table.find(room_id.get()))
                        .set(rooms::status.eq(RoomStatus::Occupied.as_str()))
                        .execute(conn)
                        .await?;
                    Ok(row)
                }
                .scope_boxed()
            },
        )
        .await
        .map_err(|err| err.into_repository_error(map_diesel_error))?;
        row_to_guest(row)
    }

    async fn check_out(
        &self,
        guest_id: GuestId,
        at: DateTime<Utc>,
    ) -> Result<CheckoutOutcome, GuestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        immediate_transaction::<_, TxError<GuestRepositoryError>, _>(&mut conn, |conn| {
            async move {
                let found: Option<(i32, String)> = guests::table
                    .find(guest_id.get())
                    .select((guests::room_id, guests::status))
                    .first(conn)
                    .await
                    .optional()?;
                let Some((room_id, status)) = found else {
                    return rejected(GuestRepositoryError::GuestNotFound { guest_id });
                };
                if status != GuestStatus::Active.as_str() {
                    return rejected(GuestRepositoryError::AlreadyCheckedOut { guest_id });
                }

                diesel::update(guests::table.find(guest_id.get()))
                    .set(guests::status.eq(GuestStatus::CheckedOut.as_str()))
                    .execute(conn)
                    .await?;
                diesel::update(rooms::table.find(room_id))
                    .set(rooms::status.eq(RoomStatus::Cleaning.as_str()))
                    .execute(conn)
                    .await?;

                let cleaning = TaskDraft::checkout_cleaning(RoomId::new(room_id));
                let task_id: i32 = diesel::insert_into(tasks::table)
                    .values(&NewTaskRow {
                        room_id,
                        task_type: cleaning.task_type().as_str(),
                        description: cleaning.description(),
                        status: TaskStatus::Pending.as_str(),
                        assigned_to: None,
                        created_at: at.naive_utc(),
                    })
                    .returning(tasks::id)
                    .get_result(conn)
                    .await?;

                Ok(CheckoutOutcome {
                    guest_id,
                    room_id: RoomId::new(room_id),
                    cleaning_task_id: TaskId::new(task_id),
                })
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| err.into_repository_error(map_diesel_error))
    }

    async fn list_active(&self) -> Result<Vec<GuestListing>, GuestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(GuestRow, Option<String>)> = guests::table
            .left_join(rooms::table)
            .filter(guests::status.eq(GuestStatus::Active.as_str()))
            .order((guests::check_in.desc(), guests::id.desc()))
            .select((GuestRow::as_select(), rooms::room_number.nullable()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(|(row, room_number)| {
                Ok(GuestListing {
                    guest: row_to_guest(row)?,
                    room_number,
                })
            })
            .collect()
    }

    async fn find_stay(
        &self,
        guest_id: GuestId,
    ) -> Result<Option<GuestStay>, GuestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let found: Option<(GuestRow, String, String, f64)> = guests::table
            .inner_join(rooms::table)
            .filter(guests::id.eq(guest_id.get()))
            .select((
                GuestRow::as_select(),
                rooms::room_number,
                rooms::room_type,
                rooms::price,
            ))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        found
            .map(|(row, room_number, room_type, price)| {
                Ok(GuestStay {
                    guest: row_to_guest(row)?,
                    room_number,
                    room_type,
                    price,
                })
            })
            .transpose()
    }

    async fn revenue_for_check_in_date(
        &self,
        day: NaiveDate,
    ) -> Result<f64, GuestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let revenue: Option<f64> = guests::table
            .inner_join(rooms::table)
            .filter(guests::check_in.eq(day))
            .filter(guests::status.eq(GuestStatus::Active.as_str()))
            .select(diesel::dsl::sum(rooms::price))
            .first(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(revenue.unwrap_or_default())
    }

    async fn recent_check_ins(
        &self,
        since: NaiveDate,
        limit: i64,
    ) -> Result<Vec<RecentCheckIn>, GuestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(String, NaiveDate, String)> = guests::table
            .inner_join(rooms::table)
            .filter(guests::check_in.ge(since))
            .filter(guests::status.eq(GuestStatus::Active.as_str()))
            .order((guests::check_in.desc(), guests::id.desc()))
            .limit(limit)
            .select((guests::name, guests::check_in, rooms::room_number))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows
            .into_iter()
            .map(|(name, check_in, room_number)| RecentCheckIn {
                name,
                check_in,
                room_number,
            })
            .collect())
    }
}
