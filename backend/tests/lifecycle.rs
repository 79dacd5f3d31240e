//! Lifecycle properties exercised through the domain services over SQLite.
//!
//! These drive the same port objects the HTTP handlers use, so they cover
//! error mapping as well as the stored effects.

use hotel_ops::domain::ports::TaskTransition;
use hotel_ops::domain::{
    ErrorCode, QualityCheckDraft, RoomDraft, RoomStatus, TaskDraft, TaskStatus,
};

#[expect(
    dead_code,
    reason = "Shared helpers include functions used only by other integration suites."
)]
mod support;

use support::{TestDatabase, stay};

#[tokio::test]
async fn check_in_occupies_the_room() {
    let db = TestDatabase::seeded().await;
    let state = db.http_state();
    let room_id = db.room_id("101").await;

    let guest = state
        .front_desk
        .check_in(stay("Ada Lovelace", room_id))
        .await
        .expect("check in");

    assert_eq!(state.rooms.room(room_id).await.expect("room").status, RoomStatus::Occupied);
    let active = state.front_desk.active_guests().await.expect("guests");
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].guest.id, guest.id);
    assert_eq!(active[0].room_number.as_deref(), Some("101"));
}

#[tokio::test]
async fn check_in_form_offers_reconciled_rooms() {
    let db = TestDatabase::seeded().await;
    let state = db.http_state();

    // 102 is seeded occupied without a guest.
    let available = state.rooms.available_rooms().await.expect("rooms");
    let mut numbers: Vec<_> = available.iter().map(|room| room.room_number.as_str()).collect();
    numbers.sort_unstable();
    assert_eq!(numbers, ["101", "102", "301"]);

    let room_id = db.room_id("102").await;
    state
        .front_desk
        .check_in(stay("Ada Lovelace", room_id))
        .await
        .expect("check in to reconciled room");
}

#[tokio::test]
async fn double_booking_is_a_conflict() {
    let db = TestDatabase::seeded().await;
    let state = db.http_state();
    let room_id = db.room_id("101").await;
    state
        .front_desk
        .check_in(stay("Ada Lovelace", room_id))
        .await
        .expect("first guest");

    let err = state
        .front_desk
        .check_in(stay("Charles Babbage", room_id))
        .await
        .expect_err("room taken");

    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[tokio::test]
async fn checkout_then_cleaning_frees_the_room() {
    let db = TestDatabase::seeded().await;
    let state = db.http_state();
    let room_id = db.room_id("301").await;
    let guest = state
        .front_desk
        .check_in(stay("Ada Lovelace", room_id))
        .await
        .expect("check in");

    let outcome = state.front_desk.check_out(guest.id).await.expect("check out");
    assert_eq!(state.rooms.room(room_id).await.expect("room").status, RoomStatus::Cleaning);

    let started = state
        .housekeeping
        .update_task_status(outcome.cleaning_task_id, TaskStatus::InProgress)
        .await
        .expect("start cleaning");
    assert!(matches!(started, TaskTransition::Started(_)));

    let completion = state
        .housekeeping
        .complete_task(outcome.cleaning_task_id)
        .await
        .expect("finish cleaning");
    assert!(completion.room_released);
    assert_eq!(state.rooms.room(room_id).await.expect("room").status, RoomStatus::Available);
}

#[tokio::test]
async fn maintenance_completion_leaves_the_room_alone() {
    let db = TestDatabase::seeded().await;
    let state = db.http_state();
    let room_id = db.room_id("202").await;
    let draft = TaskDraft::new(room_id, "maintenance", "Replace boiler", None).expect("draft");
    let task = state.housekeeping.create_task(draft).await.expect("create");

    let transition = state
        .housekeeping
        .update_task_status(task.id, TaskStatus::Completed)
        .await
        .expect("complete");

    let TaskTransition::Completed(completion) = transition else {
        panic!("expected a completion");
    };
    assert!(!completion.room_released);
    assert_eq!(
        state.rooms.room(room_id).await.expect("room").status,
        RoomStatus::Maintenance
    );
}

#[tokio::test]
async fn pending_is_not_a_target_status() {
    let db = TestDatabase::seeded().await;
    let state = db.http_state();
    let room_id = db.room_id("202").await;
    let draft = TaskDraft::new(room_id, "maintenance", "Paint", None).expect("draft");
    let task = state.housekeeping.create_task(draft).await.expect("create");

    let err = state
        .housekeeping
        .update_task_status(task.id, TaskStatus::Pending)
        .await
        .expect_err("pending is not a transition");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn occupied_room_cannot_be_deleted() {
    let db = TestDatabase::seeded().await;
    let state = db.http_state();
    let room_id = db.room_id("101").await;
    state
        .front_desk
        .check_in(stay("Ada Lovelace", room_id))
        .await
        .expect("check in");

    let err = state.rooms.delete_room(room_id).await.expect_err("in use");

    assert_eq!(err.code(), ErrorCode::InUse);
    assert!(state.rooms.room(room_id).await.is_ok());
}

#[tokio::test]
async fn duplicate_room_number_is_a_conflict() {
    let db = TestDatabase::seeded().await;
    let state = db.http_state();

    let err = state
        .rooms
        .add_room(RoomDraft::new("301", "Suite", 750_000.0).expect("draft"))
        .await
        .expect_err("duplicate");

    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[tokio::test]
async fn report_shows_forty_percent_occupancy() {
    let db = TestDatabase::seeded().await;
    let state = db.http_state();
    // Listing reconciles the seeded guestless occupied room first.
    state.rooms.list_rooms().await.expect("rooms");
    for number in ["101", "301"] {
        let room_id = db.room_id(number).await;
        state
            .front_desk
            .check_in(stay(&format!("Guest {number}"), room_id))
            .await
            .expect("check in");
    }

    let report = state.reporting.report().await.expect("report");

    assert_eq!(report.total_rooms, 5);
    assert_eq!(report.occupied_rooms, 2);
    assert!((report.occupancy_rate - 40.0).abs() < f64::EPSILON);
    assert!((report.today_revenue - 1_100_000.0).abs() < f64::EPSILON);
    assert_eq!(report.recent_activity.len(), 2);
}

#[tokio::test]
async fn dashboard_averages_recent_inspections() {
    let db = TestDatabase::seeded().await;
    let state = db.http_state();
    let room_id = db.room_id("101").await;
    for scores in [(10, 8, 6), (8, 6, 4)] {
        let draft = QualityCheckDraft::new(room_id, scores, "", "Inspector").expect("draft");
        state.quality.record_check(draft).await.expect("record");
    }

    let dashboard = state.reporting.dashboard().await.expect("dashboard");

    assert!((dashboard.quality_averages.cleanliness - 9.0).abs() < f64::EPSILON);
    assert!((dashboard.quality_averages.maintenance - 5.0).abs() < f64::EPSILON);
    assert_eq!(dashboard.room_stats.get(RoomStatus::Occupied), 0);
}
