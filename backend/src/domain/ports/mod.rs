//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by persistence adapters and
//! raise typed errors. Driving ports are implemented by domain services and
//! consumed by inbound adapters; they speak in [`crate::domain::Error`].

mod front_desk;
mod guest_repository;
mod hotel_reporting;
mod housekeeping;
mod quality_check_repository;
mod quality_inspections;
mod room_administration;
mod room_repository;
mod task_repository;

pub use front_desk::FrontDesk;
#[cfg(test)]
pub use front_desk::MockFrontDesk;
pub use guest_repository::{GuestRepository, GuestRepositoryError};
#[cfg(test)]
pub use guest_repository::MockGuestRepository;
pub use hotel_reporting::HotelReporting;
#[cfg(test)]
pub use hotel_reporting::MockHotelReporting;
pub use housekeeping::{Housekeeping, TaskTransition};
#[cfg(test)]
pub use housekeeping::MockHousekeeping;
#[cfg(test)]
pub use quality_check_repository::MockQualityCheckRepository;
pub use quality_check_repository::{QualityCheckRepository, QualityCheckRepositoryError};
#[cfg(test)]
pub use quality_inspections::MockQualityInspections;
pub use quality_inspections::QualityInspections;
#[cfg(test)]
pub use room_administration::MockRoomAdministration;
pub use room_administration::RoomAdministration;
#[cfg(test)]
pub use room_repository::MockRoomRepository;
pub use room_repository::{RoomRepository, RoomRepositoryError};
#[cfg(test)]
pub use task_repository::MockTaskRepository;
pub use task_repository::{TaskRepository, TaskRepositoryError};
