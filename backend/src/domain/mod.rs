//! Domain primitives, rules and services.
//!
//! Purpose: define strongly typed hotel entities (rooms, guests, tasks,
//! inspections), the pure room status reconciler, read-side aggregates, and
//! the services that implement the driving ports in [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Room, Guest, Task, QualityCheck and their drafts: validated inputs and
//!   stored records.
//! - `plan_reconciliation`: derives room occupancy from guest activity.
//! - `*Service`: driving port implementations over repository ports.

pub mod error;
mod front_desk_service;
pub mod guest;
mod housekeeping_service;
pub mod ports;
pub mod quality;
mod quality_service;
pub mod reconciler;
mod reporting_service;
pub mod reports;
pub mod room;
mod room_service;
pub mod task;
#[cfg(test)]
pub(crate) mod test_support;
pub mod trace_id;

pub use self::error::{Error, ErrorCode};
pub use self::front_desk_service::FrontDeskService;
pub use self::guest::{
    CheckInDraft, CheckInFields, CheckoutOutcome, Guest, GuestDetails, GuestId, GuestListing,
    GuestStatus, GuestStay, GuestValidationError, ParseGuestStatusError, RecentCheckIn,
};
pub use self::housekeeping_service::HousekeepingService;
pub use self::quality::{
    QualityAverages, QualityCheck, QualityCheckDraft, QualityCheckId, QualityCheckListing,
    QualityScores, QualityValidationError, Score,
};
pub use self::quality_service::QualityService;
pub use self::reconciler::{RoomOccupancy, StatusChange, derive_status, plan_reconciliation};
pub use self::reporting_service::{
    DASHBOARD_TASK_LIMIT, QUALITY_WINDOW_DAYS, RECENT_ACTIVITY_DAYS, RECENT_ACTIVITY_LIMIT,
    ReportingService,
};
pub use self::reports::{
    DashboardStats, DashboardView, ReportView, RoomStatusCounts, TaskStatusCounts, percentage,
};
pub use self::room::{
    ParseRoomStatusError, Room, RoomDraft, RoomId, RoomNumber, RoomSeed, RoomStatus,
    RoomValidationError, default_room_seeds,
};
pub use self::room_service::RoomService;
pub use self::task::{
    ParseTaskStatusError, Task, TaskCompletion, TaskDraft, TaskId, TaskListing, TaskStatus,
    TaskType, TaskValidationError,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
