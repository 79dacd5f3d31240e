//! Builders wiring Diesel repositories into the domain services behind
//! [`HttpState`].

use std::sync::Arc;

use mockable::Clock;

use hotel_ops::domain::{
    FrontDeskService, HousekeepingService, QualityService, ReportingService, RoomService,
};
use hotel_ops::inbound::http::state::HttpState;
use hotel_ops::outbound::persistence::{
    DbPool, DieselGuestRepository, DieselQualityCheckRepository, DieselRoomRepository,
    DieselTaskRepository,
};

/// Repository adapters sharing one pool.
struct Repositories {
    rooms: Arc<DieselRoomRepository>,
    guests: Arc<DieselGuestRepository>,
    tasks: Arc<DieselTaskRepository>,
    checks: Arc<DieselQualityCheckRepository>,
}

impl Repositories {
    fn new(pool: &DbPool) -> Self {
        Self {
            rooms: Arc::new(DieselRoomRepository::new(pool.clone())),
            guests: Arc::new(DieselGuestRepository::new(pool.clone())),
            tasks: Arc::new(DieselTaskRepository::new(pool.clone())),
            checks: Arc::new(DieselQualityCheckRepository::new(pool.clone())),
        }
    }
}

/// Build the HTTP handler state from a pool and clock.
pub(super) fn build_http_state(pool: &DbPool, clock: Arc<dyn Clock>) -> HttpState {
    let Repositories {
        rooms,
        guests,
        tasks,
        checks,
    } = Repositories::new(pool);

    HttpState {
        rooms: Arc::new(RoomService::new(rooms.clone())),
        front_desk: Arc::new(FrontDeskService::new(guests.clone(), clock.clone())),
        housekeeping: Arc::new(HousekeepingService::new(tasks.clone(), clock.clone())),
        quality: Arc::new(QualityService::new(checks.clone(), clock.clone())),
        reporting: Arc::new(ReportingService::new(rooms, guests, tasks, checks, clock)),
    }
}
