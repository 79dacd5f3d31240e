//! Startup database preparation: migrations, pool and starter rooms.

use thiserror::Error;
use tracing::info;

use crate::domain::ports::{RoomRepository, RoomRepositoryError};
use crate::domain::{RoomValidationError, default_room_seeds};
use crate::outbound::persistence::{
    DbPool, DieselRoomRepository, MigrationError, PoolConfig, PoolError, run_migrations,
};
use crate::settings::HotelSettings;

/// Errors returned while preparing the database at startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("migration failed: {0}")]
    Migration(#[from] MigrationError),
    #[error("database pool unavailable: {0}")]
    Pool(#[from] PoolError),
    #[error("built-in room seeds are invalid: {0}")]
    InvalidSeed(#[from] RoomValidationError),
    #[error("room seeding failed: {0}")]
    Seeding(#[from] RoomRepositoryError),
}

impl From<StartupError> for std::io::Error {
    fn from(err: StartupError) -> Self {
        std::io::Error::other(err)
    }
}

/// Bring the schema up to date, open the pool and seed rooms if enabled.
///
/// # Examples
///
/// ```rust,no_run
/// use std::ffi::OsString;
///
/// use hotel_ops::settings::HotelSettings;
/// use hotel_ops::startup::prepare_database;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = HotelSettings::load_from_iter([OsString::from("hotel-ops")])?;
/// let pool = prepare_database(&settings).await?;
/// # let _ = pool;
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns [`StartupError`] when migrations, pool construction or seeding
/// fail.
pub async fn prepare_database(settings: &HotelSettings) -> Result<DbPool, StartupError> {
    let path = settings.database_path();
    run_migrations(path).await?;

    let pool = DbPool::new(PoolConfig::new(path).with_max_size(settings.pool_max_size())).await?;

    if settings.seed_rooms {
        let seeds = default_room_seeds()?;
        let inserted = DieselRoomRepository::new(pool.clone())
            .seed_if_empty(&seeds)
            .await?;
        info!(inserted, "room seeding finished");
    } else {
        info!(reason = "disabled", "room seeding skipped");
    }

    Ok(pool)
}
