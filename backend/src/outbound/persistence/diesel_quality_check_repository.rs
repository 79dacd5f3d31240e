//! SQLite-backed `QualityCheckRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{QualityCheckRepository, QualityCheckRepositoryError};
use crate::domain::{QualityCheck, QualityCheckDraft, QualityCheckListing, QualityScores};

use super::diesel_error_mapping::{TxError, map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewQualityCheckRow, QualityCheckRow, ScoreRow};
use super::pool::{DbPool, PoolError, immediate_transaction};
use super::schema::{quality_checks, rooms};

/// Diesel-backed implementation of the quality check repository port.
#[derive(Clone)]
pub struct DieselQualityCheckRepository {
    pool: DbPool,
}

impl DieselQualityCheckRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> QualityCheckRepositoryError {
    map_basic_pool_error(error, QualityCheckRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> QualityCheckRepositoryError {
    map_basic_diesel_error(
        error,
        QualityCheckRepositoryError::query,
        QualityCheckRepositoryError::connection,
    )
}

fn row_to_check(row: QualityCheckRow) -> Result<QualityCheck, QualityCheckRepositoryError> {
    QualityCheck::try_from(row).map_err(QualityCheckRepositoryError::query)
}

#[async_trait]
impl QualityCheckRepository for DieselQualityCheckRepository {
    async fn record(
        &self,
        draft: &QualityCheckDraft,
        at: DateTime<Utc>,
    ) -> Result<QualityCheck, QualityCheckRepositoryError> {
        let room_id = draft.room_id();
        let scores = draft.scores();
        let new_row = NewQualityCheckRow {
            room_id: room_id.get(),
            cleanliness_score: scores.cleanliness.get(),
            amenities_score: scores.amenities.get(),
            maintenance_score: scores.maintenance.get(),
            notes: draft.notes(),
            checked_by: draft.checked_by(),
            check_date: at.naive_utc(),
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = immediate_transaction::<_, TxError<QualityCheckRepositoryError>, _>(
            &mut conn,
            |conn| {
                async move {
                    let rooms_found: i64 = rooms::table
                        .filter(rooms::id.eq(room_id.get()))
                        .count()
                        .get_result(conn)
                        .await?;
                    if rooms_found == 0 {
                        return Err(TxError::Rejected(
                            QualityCheckRepositoryError::RoomNotFound { room_id },
                        ));
                    }
                    let row = diesel::insert_into(quality_checks::table)
                        .values(&new_row)
                        .returning(QualityCheckRow::as_returning())
                        .get_result(conn)
                        .await?;
                    Ok(row)
                }
                .scope_boxed()
            },
        )
        .await
        .map_err(|err| err.into_repository_error(map_diesel_error))?;
        row_to_check(row)
    }

    async fn recent(
        &self,
        limit: i64,
    ) -> Result<Vec<QualityCheckListing>, QualityCheckRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(QualityCheckRow, Option<String>)> = quality_checks::table
            .left_join(rooms::table)
            .order((quality_checks::check_date.desc(), quality_checks::id.desc()))
            .limit(limit)
            .select((QualityCheckRow::as_select(), rooms::room_number.nullable()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(|(row, room_number)| {
                Ok(QualityCheckListing {
                    check: row_to_check(row)?,
                    room_number,
                })
            })
            .collect()
    }

    async fn scores_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<QualityScores>, QualityCheckRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = quality_checks::table
            .filter(quality_checks::check_date.ge(since.naive_utc()))
            .select(ScoreRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(|row| QualityScores::try_from(row).map_err(QualityCheckRepositoryError::query))
            .collect()
    }
}
