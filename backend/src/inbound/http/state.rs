//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FrontDesk, HotelReporting, Housekeeping, QualityInspections, RoomAdministration,
};

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
///
/// use hotel_ops::domain::{
///     FrontDeskService, HousekeepingService, QualityService, ReportingService, RoomService,
/// };
/// use hotel_ops::inbound::http::state::HttpState;
/// use hotel_ops::outbound::persistence::{
///     DbPool, DieselGuestRepository, DieselQualityCheckRepository, DieselRoomRepository,
///     DieselTaskRepository, PoolConfig,
/// };
/// use mockable::{Clock, DefaultClock};
///
/// # async fn build() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = DbPool::new(PoolConfig::new("hotel_system.db")).await?;
/// let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
/// let rooms = Arc::new(DieselRoomRepository::new(pool.clone()));
/// let guests = Arc::new(DieselGuestRepository::new(pool.clone()));
/// let tasks = Arc::new(DieselTaskRepository::new(pool.clone()));
/// let checks = Arc::new(DieselQualityCheckRepository::new(pool));
/// let state = HttpState {
///     rooms: Arc::new(RoomService::new(rooms.clone())),
///     front_desk: Arc::new(FrontDeskService::new(guests.clone(), clock.clone())),
///     housekeeping: Arc::new(HousekeepingService::new(tasks.clone(), clock.clone())),
///     quality: Arc::new(QualityService::new(checks.clone(), clock.clone())),
///     reporting: Arc::new(ReportingService::new(rooms, guests, tasks, checks, clock)),
/// };
/// # let _ = state;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct HttpState {
    pub rooms: Arc<dyn RoomAdministration>,
    pub front_desk: Arc<dyn FrontDesk>,
    pub housekeeping: Arc<dyn Housekeeping>,
    pub quality: Arc<dyn QualityInspections>,
    pub reporting: Arc<dyn HotelReporting>,
}
