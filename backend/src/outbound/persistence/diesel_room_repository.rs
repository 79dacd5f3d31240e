//! SQLite-backed `RoomRepository` implementation using Diesel ORM.
//!
//! Reconciliation reads every room and the set of rooms with an active guest,
//! plans the writes with the pure domain reconciler, and applies them as one
//! bulk update per target status, all inside one transaction.

use std::collections::HashSet;

use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{RoomRepository, RoomRepositoryError};
use crate::domain::{
    GuestStatus, Room, RoomDraft, RoomId, RoomOccupancy, RoomSeed, RoomStatus, RoomStatusCounts,
    StatusChange, plan_reconciliation,
};

use super::diesel_error_mapping::{
    TxError, is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewRoomRow, RoomRow, RoomUpdate};
use super::pool::{DbPool, PoolError, immediate_transaction};
use super::schema::{guests, rooms};

/// Diesel-backed implementation of the room repository port.
#[derive(Clone)]
pub struct DieselRoomRepository {
    pool: DbPool,
}

impl DieselRoomRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RoomRepositoryError {
    map_basic_pool_error(error, RoomRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> RoomRepositoryError {
    map_basic_diesel_error(
        error,
        RoomRepositoryError::query,
        RoomRepositoryError::connection,
    )
}

/// Unique violations on `rooms` can only come from `room_number`.
fn map_write_error(error: diesel::result::Error, room_number: &str) -> RoomRepositoryError {
    if is_unique_violation(&error) {
        return RoomRepositoryError::DuplicateNumber {
            room_number: room_number.to_owned(),
        };
    }
    map_diesel_error(error)
}

fn row_to_room(row: RoomRow) -> Result<Room, RoomRepositoryError> {
    Room::try_from(row).map_err(RoomRepositoryError::query)
}

fn rows_to_rooms(rows: Vec<RoomRow>) -> Result<Vec<Room>, RoomRepositoryError> {
    rows.into_iter().map(row_to_room).collect()
}

fn parse_status(raw: &str) -> Result<RoomStatus, RoomRepositoryError> {
    raw.parse::<RoomStatus>()
        .map_err(|err| RoomRepositoryError::query(err.to_string()))
}

#[async_trait]
impl RoomRepository for DieselRoomRepository {
    async fn list_rooms(&self) -> Result<Vec<Room>, RoomRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = rooms::table
            .order(rooms::room_number.asc())
            .select(RoomRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_rooms(rows)
    }

    async fn list_rooms_with_status(
        &self,
        status: RoomStatus,
    ) -> Result<Vec<Room>, RoomRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = rooms::table
            .filter(rooms::status.eq(status.as_str()))
            .order(rooms::room_number.asc())
            .select(RoomRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_rooms(rows)
    }

    async fn find_room(&self, room_id: RoomId) -> Result<Option<Room>, RoomRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        rooms::table
            .find(room_id.get())
            .select(RoomRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_room)
            .transpose()
    }

    async fn create_room(&self, draft: &RoomDraft) -> Result<Room, RoomRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewRoomRow {
            room_number: draft.number().as_str(),
            room_type: draft.room_type(),
            status: RoomStatus::Available.as_str(),
            price: draft.price(),
        };
        let row = diesel::insert_into(rooms::table)
            .values(&new_row)
            .returning(RoomRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_write_error(err, draft.number().as_str()))?;
        row_to_room(row)
    }

    async fn update_room(
        &self,
        room_id: RoomId,
        draft: &RoomDraft,
    ) -> Result<Room, RoomRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = RoomUpdate {
            room_number: draft.number().as_str(),
            room_type: draft.room_type(),
            price: draft.price(),
        };
        let row = diesel::update(rooms::table.find(room_id.get()))
            .set(&changes)
            .returning(RoomRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_write_error(err, draft.number().as_str()))?
            .ok_or(RoomRepositoryError::NotFound { room_id })?;
        row_to_room(row)
    }

    async fn set_status(
        &self,
        room_id: RoomId,
        status: RoomStatus,
    ) -> Result<Room, RoomRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(rooms::table.find(room_id.get()))
            .set(rooms::status.eq(status.as_str()))
            .returning(RoomRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .ok_or(RoomRepositoryError::NotFound { room_id })?;
        row_to_room(row)
    }

    async fn delete_room(&self, room_id: RoomId) -> Result<(), RoomRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        immediate_transaction::<_, TxError<RoomRepositoryError>, _>(&mut conn, |conn| {
            async move {
                let active_guests: i64 = guests::table
                    .filter(guests::room_id.eq(room_id.get()))
                    .filter(guests::status.eq(GuestStatus::Active.as_str()))
                    .count()
                    .get_result(conn)
                    .await?;
                if active_guests > 0 {
                    return Err(TxError::Rejected(RoomRepositoryError::Occupied { room_id }));
                }
                let deleted = diesel::delete(rooms::table.find(room_id.get()))
                    .execute(conn)
                    .await?;
                if deleted == 0 {
                    return Err(TxError::Rejected(RoomRepositoryError::NotFound { room_id }));
                }
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| err.into_repository_error(map_diesel_error))
    }

    async fn count_by_status(&self) -> Result<RoomStatusCounts, RoomRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(String, i64)> = rooms::table
            .group_by(rooms::status)
            .select((rooms::status, count_star()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let pairs = rows
            .into_iter()
            .map(|(status, count)| {
                Ok((parse_status(&status)?, u64::try_from(count).unwrap_or_default()))
            })
            .collect::<Result<Vec<_>, RoomRepositoryError>>()?;
        Ok(RoomStatusCounts::from_pairs(pairs))
    }

    async fn reconcile_statuses(&self) -> Result<Vec<StatusChange>, RoomRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        immediate_transaction::<_, TxError<RoomRepositoryError>, _>(&mut conn, |conn| {
            async move {
                let room_rows: Vec<(i32, String)> = rooms::table
                    .select((rooms::id, rooms::status))
                    .order(rooms::id.asc())
                    .load(conn)
                    .await?;
                let occupied: HashSet<i32> = guests::table
                    .filter(guests::status.eq(GuestStatus::Active.as_str()))
                    .select(guests::room_id)
                    .distinct()
                    .load::<i32>(conn)
                    .await?
                    .into_iter()
                    .collect();

                let snapshot = room_rows
                    .into_iter()
                    .map(|(id, status)| {
                        Ok(RoomOccupancy {
                            room_id: RoomId::new(id),
                            status: parse_status(&status).map_err(TxError::Rejected)?,
                            has_active_guest: occupied.contains(&id),
                        })
                    })
                    .collect::<Result<Vec<_>, TxError<RoomRepositoryError>>>()?;
                let changes = plan_reconciliation(&snapshot);

                for target in [RoomStatus::Occupied, RoomStatus::Available] {
                    let ids: Vec<i32> = changes
                        .iter()
                        .filter(|change| change.to == target)
                        .map(|change| change.room_id.get())
                        .collect();
                    if ids.is_empty() {
                        continue;
                    }
                    diesel::update(rooms::table.filter(rooms::id.eq_any(ids)))
                        .set(rooms::status.eq(target.as_str()))
                        .execute(conn)
                        .await?;
                }
                debug!(changed = changes.len(), "room statuses reconciled");
                Ok(changes)
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| err.into_repository_error(map_diesel_error))
    }

    async fn seed_if_empty(&self, seeds: &[RoomSeed]) -> Result<usize, RoomRepositoryError> {
        let rows: Vec<NewRoomRow<'_>> = seeds
            .iter()
            .map(|seed| NewRoomRow {
                room_number: seed.draft.number().as_str(),
                room_type: seed.draft.room_type(),
                status: seed.status.as_str(),
                price: seed.draft.price(),
            })
            .collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        immediate_transaction::<_, diesel::result::Error, _>(&mut conn, |conn| {
            async move {
                let existing: i64 = rooms::table.count().get_result(conn).await?;
                if existing > 0 || rows.is_empty() {
                    return Ok(0);
                }
                diesel::insert_into(rooms::table)
                    .values(&rows)
                    .execute(conn)
                    .await
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}
