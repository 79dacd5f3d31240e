//! Driving port for room listings and room administration.

use async_trait::async_trait;

use crate::domain::{Error, Room, RoomDraft, RoomId, RoomStatus, StatusChange};

/// Use cases behind the rooms pages and the room status API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomAdministration: Send + Sync {
    /// Bring room statuses in line with guest activity.
    async fn reconcile(&self) -> Result<Vec<StatusChange>, Error>;

    /// Reconcile, then list every room by number.
    async fn list_rooms(&self) -> Result<Vec<Room>, Error>;

    /// Rooms that can take a check-in.
    async fn available_rooms(&self) -> Result<Vec<Room>, Error>;

    /// Fetch one room; `NotFound` when it does not exist.
    async fn room(&self, room_id: RoomId) -> Result<Room, Error>;

    async fn add_room(&self, draft: RoomDraft) -> Result<Room, Error>;

    async fn edit_room(&self, room_id: RoomId, draft: RoomDraft) -> Result<Room, Error>;

    /// Manually set a room's status, including the sticky ones.
    async fn set_room_status(&self, room_id: RoomId, status: RoomStatus) -> Result<Room, Error>;

    /// Delete a room; `InUse` while an active guest references it.
    async fn delete_room(&self, room_id: RoomId) -> Result<(), Error>;
}
