//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer. Conversions into domain
//! types parse status text and fail with a message when a row holds a value
//! the domain does not recognise.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::{
    Guest, GuestId, QualityCheck, QualityCheckId, QualityScores, Room, RoomId, Score, Task,
    TaskId, TaskType,
};

use super::schema::{guests, quality_checks, rooms, tasks};

/// Row struct for reading from the rooms table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = rooms)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct RoomRow {
    pub id: i32,
    pub room_number: String,
    pub room_type: String,
    pub status: String,
    pub price: f64,
}

impl TryFrom<RoomRow> for Room {
    type Error = String;

    fn try_from(row: RoomRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: RoomId::new(row.id),
            status: row.status.parse().map_err(|err| format!("room {}: {err}", row.id))?,
            room_number: row.room_number,
            room_type: row.room_type,
            price: row.price,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = rooms)]
pub(crate) struct NewRoomRow<'a> {
    pub room_number: &'a str,
    pub room_type: &'a str,
    pub status: &'a str,
    pub price: f64,
}

/// Admin edits touch everything except status.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = rooms)]
pub(crate) struct RoomUpdate<'a> {
    pub room_number: &'a str,
    pub room_type: &'a str,
    pub price: f64,
}

// ---------------------------------------------------------------------------
// Guests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = guests)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct GuestRow {
    pub id: i32,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub room_id: i32,
    pub status: String,
}

impl TryFrom<GuestRow> for Guest {
    type Error = String;

    fn try_from(row: GuestRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: GuestId::new(row.id),
            status: row.status.parse().map_err(|err| format!("guest {}: {err}", row.id))?,
            name: row.name,
            phone: row.phone,
            email: row.email,
            check_in: row.check_in,
            check_out: row.check_out,
            room_id: RoomId::new(row.room_id),
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = guests)]
pub(crate) struct NewGuestRow<'a> {
    pub name: &'a str,
    pub phone: Option<&'a str>,
    pub email: Option<&'a str>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub room_id: i32,
    pub status: &'a str,
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct TaskRow {
    pub id: i32,
    pub room_id: i32,
    pub task_type: String,
    pub description: String,
    pub status: String,
    pub assigned_to: Option<String>,
    pub created_at: NaiveDateTime,
    pub completed_at: Option<NaiveDateTime>,
}

impl TryFrom<TaskRow> for Task {
    type Error = String;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: TaskId::new(row.id),
            status: row.status.parse().map_err(|err| format!("task {}: {err}", row.id))?,
            room_id: RoomId::new(row.room_id),
            task_type: TaskType::from(row.task_type),
            description: row.description,
            assigned_to: row.assigned_to,
            created_at: row.created_at.and_utc(),
            completed_at: row.completed_at.map(|at| at.and_utc()),
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub(crate) struct NewTaskRow<'a> {
    pub room_id: i32,
    pub task_type: &'a str,
    pub description: &'a str,
    pub status: &'a str,
    pub assigned_to: Option<&'a str>,
    pub created_at: NaiveDateTime,
}

// ---------------------------------------------------------------------------
// Quality checks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = quality_checks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct QualityCheckRow {
    pub id: i32,
    pub room_id: i32,
    pub cleanliness_score: i32,
    pub amenities_score: i32,
    pub maintenance_score: i32,
    pub notes: String,
    pub checked_by: String,
    pub check_date: NaiveDateTime,
}

/// The three score columns on their own.
#[derive(Debug, Clone, Copy, Queryable, Selectable)]
#[diesel(table_name = quality_checks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct ScoreRow {
    pub cleanliness_score: i32,
    pub amenities_score: i32,
    pub maintenance_score: i32,
}

impl TryFrom<ScoreRow> for QualityScores {
    type Error = String;

    fn try_from(row: ScoreRow) -> Result<Self, Self::Error> {
        let score = |category: &'static str, value: i32| {
            Score::new(category, value).map_err(|err| err.to_string())
        };
        Ok(Self {
            cleanliness: score("cleanliness", row.cleanliness_score)?,
            amenities: score("amenities", row.amenities_score)?,
            maintenance: score("maintenance", row.maintenance_score)?,
        })
    }
}

impl TryFrom<QualityCheckRow> for QualityCheck {
    type Error = String;

    fn try_from(row: QualityCheckRow) -> Result<Self, Self::Error> {
        let scores = QualityScores::try_from(ScoreRow {
            cleanliness_score: row.cleanliness_score,
            amenities_score: row.amenities_score,
            maintenance_score: row.maintenance_score,
        })
        .map_err(|err| format!("quality check {}: {err}", row.id))?;
        Ok(Self {
            id: QualityCheckId::new(row.id),
            room_id: RoomId::new(row.room_id),
            scores,
            notes: row.notes,
            checked_by: row.checked_by,
            check_date: row.check_date.and_utc(),
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = quality_checks)]
pub(crate) struct NewQualityCheckRow<'a> {
    pub room_id: i32,
    pub cleanliness_score: i32,
    pub amenities_score: i32,
    pub maintenance_score: i32,
    pub notes: &'a str,
    pub checked_by: &'a str,
    pub check_date: NaiveDateTime,
}
