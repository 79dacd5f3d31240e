//! SQLite persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of domain repository ports
//! backed by a single SQLite file via Diesel, with async access through
//! `diesel-async`'s sync connection wrapper and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories translate between Diesel rows and domain
//!   types. Multi-row invariants (check-in, checkout, task completion) run in
//!   one transaction each.
//! - **Internal models**: row structs (`models.rs`) and the table definitions
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: Diesel and pool failures are mapped to the
//!   error enum of each port.
//!
//! # Example
//!
//! ```ignore
//! use hotel_ops::outbound::persistence::{DbPool, DieselRoomRepository, PoolConfig};
//!
//! run_migrations("hotel_system.db").await?;
//! let pool = DbPool::new(PoolConfig::new("hotel_system.db")).await?;
//! let rooms = DieselRoomRepository::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_guest_repository;
mod diesel_quality_check_repository;
mod diesel_room_repository;
mod diesel_task_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_guest_repository::DieselGuestRepository;
pub use diesel_quality_check_repository::DieselQualityCheckRepository;
pub use diesel_room_repository::DieselRoomRepository;
pub use diesel_task_repository::DieselTaskRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError, SqliteConn};
