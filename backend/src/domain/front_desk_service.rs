//! Check-in and checkout service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{FrontDesk, GuestRepository, GuestRepositoryError};
use crate::domain::{
    CheckInDraft, CheckoutOutcome, Error, Guest, GuestDetails, GuestId, GuestListing,
};

pub(crate) fn map_guest_repository_error(error: GuestRepositoryError) -> Error {
    match error {
        GuestRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("guest repository unavailable: {message}"))
        }
        GuestRepositoryError::Query { message } => {
            Error::internal(format!("guest repository error: {message}"))
        }
        err @ (GuestRepositoryError::GuestNotFound { .. }
        | GuestRepositoryError::RoomNotFound { .. }) => Error::not_found(err.to_string()),
        err @ (GuestRepositoryError::RoomUnavailable { .. }
        | GuestRepositoryError::AlreadyCheckedOut { .. }) => Error::conflict(err.to_string()),
    }
}

/// Front desk service implementing [`FrontDesk`].
#[derive(Clone)]
pub struct FrontDeskService<G> {
    guests: Arc<G>,
    clock: Arc<dyn Clock>,
}

impl<G> FrontDeskService<G> {
    pub fn new(guests: Arc<G>, clock: Arc<dyn Clock>) -> Self {
        Self { guests, clock }
    }
}

#[async_trait]
impl<G> FrontDesk for FrontDeskService<G>
where
    G: GuestRepository,
{
    async fn check_in(&self, draft: CheckInDraft) -> Result<Guest, Error> {
        let guest = self
            .guests
            .check_in(&draft)
            .await
            .map_err(map_guest_repository_error)?;
        info!(
            guest_id = %guest.id,
            room_id = %guest.room_id,
            nights = draft.nights(),
            "guest checked in"
        );
        Ok(guest)
    }

    async fn check_out(&self, guest_id: GuestId) -> Result<CheckoutOutcome, Error> {
        let outcome = self
            .guests
            .check_out(guest_id, self.clock.utc())
            .await
            .map_err(map_guest_repository_error)?;
        info!(
            %guest_id,
            room_id = %outcome.room_id,
            task_id = %outcome.cleaning_task_id,
            "guest checked out; room queued for cleaning"
        );
        Ok(outcome)
    }

    async fn active_guests(&self) -> Result<Vec<GuestListing>, Error> {
        self.guests
            .list_active()
            .await
            .map_err(map_guest_repository_error)
    }

    async fn guest_details(&self, guest_id: GuestId) -> Result<GuestDetails, Error> {
        self.guests
            .find_stay(guest_id)
            .await
            .map_err(map_guest_repository_error)?
            .map(GuestDetails::from)
            .ok_or_else(|| Error::not_found(format!("guest {guest_id} not found")))
    }
}
