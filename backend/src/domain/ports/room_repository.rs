//! Port for room persistence and status reconciliation.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    Room, RoomDraft, RoomId, RoomSeed, RoomStatus, RoomStatusCounts, StatusChange,
};

/// Errors raised by room repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomRepositoryError {
    /// Repository connection could not be established.
    #[error("room repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("room repository query failed: {message}")]
    Query { message: String },
    #[error("room {room_id} not found")]
    NotFound { room_id: RoomId },
    #[error("room number {room_number} already exists")]
    DuplicateNumber { room_number: String },
    /// The room still has an active guest.
    #[error("room {room_id} has an active guest")]
    Occupied { room_id: RoomId },
}

impl RoomRepositoryError {
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
pub trait RoomRepository: Send + Sync {
    /// Every room, ordered by room number.
    async fn list_rooms(&self) -> Result<Vec<Room>, RoomRepositoryError>;

    /// Rooms currently in `status`, ordered by room number.
    async fn list_rooms_with_status(
        &self,
        status: RoomStatus,
    ) -> Result<Vec<Room>, RoomRepositoryError>;

    async fn find_room(&self, room_id: RoomId) -> Result<Option<Room>, RoomRepositoryError>;

    /// Insert an `available` room.
    async fn create_room(&self, draft: &RoomDraft) -> Result<Room, RoomRepositoryError>;

    /// Replace number, type and price; status is left alone.
    async fn update_room(
        &self,
        room_id: RoomId,
        draft: &RoomDraft,
    ) -> Result<Room, RoomRepositoryError>;

    async fn set_status(
        &self,
        room_id: RoomId,
        status: RoomStatus,
    ) -> Result<Room, RoomRepositoryError>;

    /// Delete a room that no active guest references.
    async fn delete_room(&self, room_id: RoomId) -> Result<(), RoomRepositoryError>;

    async fn count_by_status(&self) -> Result<RoomStatusCounts, RoomRepositoryError>;

    /// Reconcile every room against guest activity in one transaction and
    /// return the writes that were applied.
    async fn reconcile_statuses(&self) -> Result<Vec<StatusChange>, RoomRepositoryError>;

    /// Insert `seeds` when the room table is empty. Returns how many rooms
    /// were inserted.
    async fn seed_if_empty(&self, seeds: &[RoomSeed]) -> Result<usize, RoomRepositoryError>;
}
