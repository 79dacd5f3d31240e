//! Room administration service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{RoomAdministration, RoomRepository, RoomRepositoryError};
use crate::domain::{Error, Room, RoomDraft, RoomId, RoomStatus, StatusChange};

pub(crate) fn map_room_repository_error(error: RoomRepositoryError) -> Error {
    match error {
        RoomRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("room repository unavailable: {message}"))
        }
        RoomRepositoryError::Query { message } => {
            Error::internal(format!("room repository error: {message}"))
        }
        err @ RoomRepositoryError::NotFound { .. } => Error::not_found(err.to_string()),
        err @ RoomRepositoryError::DuplicateNumber { .. } => Error::conflict(err.to_string()),
        RoomRepositoryError::Occupied { room_id } => Error::in_use(format!(
            "room {room_id} cannot be deleted while a guest is checked in"
        )),
    }
}

/// Room service implementing [`RoomAdministration`].
#[derive(Clone)]
pub struct RoomService<R> {
    rooms: Arc<R>,
}

impl<R> RoomService<R> {
    pub fn new(rooms: Arc<R>) -> Self {
        Self { rooms }
    }
}

#[async_trait]
impl<R> RoomAdministration for RoomService<R>
where
    R: RoomRepository,
{
    async fn reconcile(&self) -> Result<Vec<StatusChange>, Error> {
        let changes = self
            .rooms
            .reconcile_statuses()
            .await
            .map_err(map_room_repository_error)?;
        for change in &changes {
            info!(
                room_id = %change.room_id,
                from = %change.from,
                to = %change.to,
                "room status reconciled"
            );
        }
        Ok(changes)
    }

    async fn list_rooms(&self) -> Result<Vec<Room>, Error> {
        self.reconcile().await?;
        self.rooms
            .list_rooms()
            .await
            .map_err(map_room_repository_error)
    }

    async fn available_rooms(&self) -> Result<Vec<Room>, Error> {
        self.reconcile().await?;
        self.rooms
            .list_rooms_with_status(RoomStatus::Available)
            .await
            .map_err(map_room_repository_error)
    }

    async fn room(&self, room_id: RoomId) -> Result<Room, Error> {
        self.rooms
            .find_room(room_id)
            .await
            .map_err(map_room_repository_error)?
            .ok_or_else(|| Error::not_found(format!("room {room_id} not found")))
    }

    async fn add_room(&self, draft: RoomDraft) -> Result<Room, Error> {
        let room = self
            .rooms
            .create_room(&draft)
            .await
            .map_err(map_room_repository_error)?;
        info!(room_id = %room.id, room_number = %room.room_number, "room added");
        Ok(room)
    }

    async fn edit_room(&self, room_id: RoomId, draft: RoomDraft) -> Result<Room, Error> {
        let room = self
            .rooms
            .update_room(room_id, &draft)
            .await
            .map_err(map_room_repository_error)?;
        info!(%room_id, room_number = %room.room_number, "room updated");
        Ok(room)
    }

    async fn set_room_status(&self, room_id: RoomId, status: RoomStatus) -> Result<Room, Error> {
        let room = self
            .rooms
            .set_status(room_id, status)
            .await
            .map_err(map_room_repository_error)?;
        info!(%room_id, %status, "room status set manually");
        Ok(room)
    }

    async fn delete_room(&self, room_id: RoomId) -> Result<(), Error> {
        self.rooms
            .delete_room(room_id)
            .await
            .map_err(map_room_repository_error)?;
        info!(%room_id, "room deleted");
        Ok(())
    }
}
