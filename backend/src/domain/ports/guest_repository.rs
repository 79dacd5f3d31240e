//! Port for guest stays: check-in, checkout and stay reads.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

use crate::domain::{
    CheckInDraft, CheckoutOutcome, Guest, GuestId, GuestListing, GuestStay, RecentCheckIn,
    RoomId, RoomStatus,
};

/// Errors raised by guest repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuestRepositoryError {
    /// Repository connection could not be established.
    #[error("guest repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("guest repository query failed: {message}")]
    Query { message: String },
    #[error("guest {guest_id} not found")]
    GuestNotFound { guest_id: GuestId },
    #[error("room {room_id} not found")]
    RoomNotFound { room_id: RoomId },
    #[error("room {room_id} is {status}, not available")]
    RoomUnavailable { room_id: RoomId, status: RoomStatus },
    #[error("guest {guest_id} has already checked out")]
    AlreadyCheckedOut { guest_id: GuestId },
}

impl GuestRepositoryError {
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
pub trait GuestRepository: Send + Sync {
    /// Insert an active guest and mark the room occupied in one transaction.
    /// The room must exist and be `available`.
    async fn check_in(&self, draft: &CheckInDraft) -> Result<Guest, GuestRepositoryError>;

    /// Mark the guest checked out, send the room to cleaning and append a
    /// pending cleaning task created at `at`, in one transaction.
    async fn check_out(
        &self,
        guest_id: GuestId,
        at: DateTime<Utc>,
    ) -> Result<CheckoutOutcome, GuestRepositoryError>;

    /// Active guests, newest check-in first.
    async fn list_active(&self) -> Result<Vec<GuestListing>, GuestRepositoryError>;

    /// A guest joined with their room, or `None` when either is missing.
    async fn find_stay(&self, guest_id: GuestId) -> Result<Option<GuestStay>, GuestRepositoryError>;

    /// Sum of room prices for active guests who checked in on `day`.
    async fn revenue_for_check_in_date(&self, day: NaiveDate)
    -> Result<f64, GuestRepositoryError>;

    /// Active guests who checked in on or after `since`, newest first.
    async fn recent_check_ins(
        &self,
        since: NaiveDate,
        limit: i64,
    ) -> Result<Vec<RecentCheckIn>, GuestRepositoryError>;
}
