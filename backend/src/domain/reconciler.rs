//! Room status reconciliation.
//!
//! The only place room occupancy is derived from guest activity. Adapters
//! supply a snapshot of every room with a flag saying whether an active guest
//! references it; [`plan_reconciliation`] returns the status writes needed to
//! bring the rooms in line. Applying the plan and planning again yields
//! nothing.

use serde::Serialize;

use super::{RoomId, RoomStatus};

/// Snapshot of one room as seen by the reconciler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomOccupancy {
    pub room_id: RoomId,
    pub status: RoomStatus,
    pub has_active_guest: bool,
}

/// A status write the reconciler wants applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusChange {
    pub room_id: RoomId,
    pub from: RoomStatus,
    pub to: RoomStatus,
}

/// Status a room should hold given its current status and guest activity.
///
/// # Examples
/// ```
/// use hotel_ops::domain::{RoomStatus, derive_status};
///
/// assert_eq!(derive_status(RoomStatus::Available, true), RoomStatus::Occupied);
/// assert_eq!(derive_status(RoomStatus::Occupied, false), RoomStatus::Available);
/// assert_eq!(derive_status(RoomStatus::Maintenance, true), RoomStatus::Maintenance);
/// ```
#[must_use]
pub fn derive_status(current: RoomStatus, has_active_guest: bool) -> RoomStatus {
    if current.is_sticky() {
        return current;
    }
    match (current, has_active_guest) {
        (_, true) => RoomStatus::Occupied,
        (RoomStatus::Occupied, false) => RoomStatus::Available,
        (other, false) => other,
    }
}

/// Status writes needed to reconcile `rooms`, in input order.
#[must_use]
pub fn plan_reconciliation(rooms: &[RoomOccupancy]) -> Vec<StatusChange> {
    rooms
        .iter()
        .filter_map(|room| {
            let to = derive_status(room.status, room.has_active_guest);
            (to != room.status).then_some(StatusChange {
                room_id: room.room_id,
                from: room.status,
                to,
            })
        })
        .collect()
}
