//! Driving port for guest check-in and checkout.

use async_trait::async_trait;

use crate::domain::{
    CheckInDraft, CheckoutOutcome, Error, Guest, GuestDetails, GuestId, GuestListing,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FrontDesk: Send + Sync {
    /// Register a guest in an available room and mark it occupied.
    async fn check_in(&self, draft: CheckInDraft) -> Result<Guest, Error>;

    /// Check a guest out, send the room to cleaning and queue a cleaning task.
    async fn check_out(&self, guest_id: GuestId) -> Result<CheckoutOutcome, Error>;

    async fn active_guests(&self) -> Result<Vec<GuestListing>, Error>;

    /// Guest with room, nights booked and total cost.
    async fn guest_details(&self, guest_id: GuestId) -> Result<GuestDetails, Error>;
}
