//! Shared helper utilities for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! each suite pulls this module in with `mod support;` and only uses what it
//! needs.

use std::sync::Arc;

use chrono::{Days, NaiveDate, Utc};
use mockable::{Clock, DefaultClock};
use tempfile::TempDir;

use hotel_ops::domain::ports::RoomRepository;
use hotel_ops::domain::{
    CheckInDraft, CheckInFields, FrontDeskService, HousekeepingService, QualityService,
    ReportingService, RoomId, RoomService, default_room_seeds,
};
use hotel_ops::inbound::http::state::HttpState;
use hotel_ops::outbound::persistence::{
    DbPool, DieselGuestRepository, DieselQualityCheckRepository, DieselRoomRepository,
    DieselTaskRepository, PoolConfig, run_migrations,
};

/// A migrated SQLite file in a temporary directory.
pub struct TestDatabase {
    pub pool: DbPool,
    _dir: TempDir,
}

impl TestDatabase {
    /// Create an empty, migrated database.
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("hotel.db").to_string_lossy().into_owned();
        run_migrations(path.clone()).await.expect("migrations");
        let pool = DbPool::new(PoolConfig::new(path).with_max_size(2))
            .await
            .expect("pool");
        Self { pool, _dir: dir }
    }

    /// Create a database holding the five starter rooms.
    pub async fn seeded() -> Self {
        let db = Self::new().await;
        let seeds = default_room_seeds().expect("seeds");
        let inserted = db.rooms().seed_if_empty(&seeds).await.expect("seed rooms");
        assert_eq!(inserted, 5);
        db
    }

    pub fn rooms(&self) -> DieselRoomRepository {
        DieselRoomRepository::new(self.pool.clone())
    }

    pub fn guests(&self) -> DieselGuestRepository {
        DieselGuestRepository::new(self.pool.clone())
    }

    pub fn tasks(&self) -> DieselTaskRepository {
        DieselTaskRepository::new(self.pool.clone())
    }

    pub fn checks(&self) -> DieselQualityCheckRepository {
        DieselQualityCheckRepository::new(self.pool.clone())
    }

    /// Room id for a seeded room number.
    pub async fn room_id(&self, number: &str) -> RoomId {
        self.rooms()
            .list_rooms()
            .await
            .expect("list rooms")
            .into_iter()
            .find(|room| room.room_number == number)
            .map(|room| room.id)
            .expect("seeded room")
    }

    /// Domain services over this database, as the server wires them.
    pub fn http_state(&self) -> HttpState {
        let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
        let rooms = Arc::new(self.rooms());
        let guests = Arc::new(self.guests());
        let tasks = Arc::new(self.tasks());
        let checks = Arc::new(self.checks());
        HttpState {
            rooms: Arc::new(RoomService::new(rooms.clone())),
            front_desk: Arc::new(FrontDeskService::new(guests.clone(), clock.clone())),
            housekeeping: Arc::new(HousekeepingService::new(tasks.clone(), clock.clone())),
            quality: Arc::new(QualityService::new(checks.clone(), clock.clone())),
            reporting: Arc::new(ReportingService::new(rooms, guests, tasks, checks, clock)),
        }
    }
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// A valid two-night stay starting today.
pub fn stay(name: &str, room_id: RoomId) -> CheckInDraft {
    let check_in = today();
    CheckInDraft::new(CheckInFields {
        name: name.to_owned(),
        phone: None,
        email: None,
        room_id,
        check_in,
        check_out: check_in
            .checked_add_days(Days::new(2))
            .expect("date in range"),
    })
    .expect("valid stay")
}
