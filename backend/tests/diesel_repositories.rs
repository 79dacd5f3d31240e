//! Integration tests for the Diesel repositories against a real SQLite file.
//!
//! Each test gets its own migrated database in a temporary directory, seeded
//! with the five starter rooms where noted.

use chrono::{Duration, Utc};
use rstest::rstest;

use hotel_ops::domain::ports::{
    GuestRepository, GuestRepositoryError, QualityCheckRepository, QualityCheckRepositoryError,
    RoomRepository, RoomRepositoryError, TaskRepository, TaskRepositoryError,
};
use hotel_ops::domain::{
    GuestId, GuestStatus, QualityCheckDraft, RoomDraft, RoomId, RoomStatus, TaskDraft, TaskId,
    TaskStatus, TaskType, default_room_seeds,
};

#[expect(
    dead_code,
    reason = "Shared helpers include functions used only by other integration suites."
)]
mod support;

use support::{TestDatabase, stay, today};

#[tokio::test]
async fn seeding_only_fills_an_empty_table() {
    let db = TestDatabase::seeded().await;
    let seeds = default_room_seeds().expect("seeds");

    let again = db.rooms().seed_if_empty(&seeds).await.expect("reseed");

    assert_eq!(again, 0);
    assert_eq!(db.rooms().list_rooms().await.expect("rooms").len(), 5);
}

#[tokio::test]
async fn duplicate_room_numbers_conflict() {
    let db = TestDatabase::seeded().await;
    let draft = RoomDraft::new("101", "Standard", 1.0).expect("draft");

    let err = db.rooms().create_room(&draft).await.expect_err("duplicate");

    assert!(matches!(err, RoomRepositoryError::DuplicateNumber { .. }));
}

#[tokio::test]
async fn reconciliation_frees_unoccupied_rooms_once() {
    let db = TestDatabase::seeded().await;
    let rooms = db.rooms();

    let first = rooms.reconcile_statuses().await.expect("first pass");
    let second = rooms.reconcile_statuses().await.expect("second pass");

    // 102 is seeded occupied without a guest.
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].from, RoomStatus::Occupied);
    assert_eq!(first[0].to, RoomStatus::Available);
    assert!(second.is_empty());
}

#[tokio::test]
async fn reconciliation_keeps_sticky_rooms_with_guests() {
    let db = TestDatabase::seeded().await;
    let room_id = db.room_id("101").await;
    db.guests()
        .check_in(&stay("Grace Hopper", room_id))
        .await
        .expect("check in");
    db.rooms()
        .set_status(room_id, RoomStatus::Maintenance)
        .await
        .expect("manual status");

    db.rooms().reconcile_statuses().await.expect("reconcile");

    let room = db.rooms().find_room(room_id).await.expect("find").expect("room");
    assert_eq!(room.status, RoomStatus::Maintenance);
}

#[tokio::test]
async fn editing_a_room_keeps_its_status() {
    let db = TestDatabase::seeded().await;
    let room_id = db.room_id("201").await;
    let draft = RoomDraft::new("205", "Deluxe Twin", 550_000.0).expect("draft");

    let room = db.rooms().update_room(room_id, &draft).await.expect("update");

    assert_eq!(room.room_number, "205");
    assert_eq!(room.room_type, "Deluxe Twin");
    assert_eq!(room.status, RoomStatus::Cleaning);
}

#[tokio::test]
async fn renaming_onto_a_taken_number_conflicts() {
    let db = TestDatabase::seeded().await;
    let room_id = db.room_id("201").await;
    let draft = RoomDraft::new("101", "Deluxe", 500_000.0).expect("draft");

    let err = db
        .rooms()
        .update_room(room_id, &draft)
        .await
        .expect_err("number taken");

    assert!(matches!(err, RoomRepositoryError::DuplicateNumber { .. }));
    let room = db.rooms().find_room(room_id).await.expect("find").expect("room");
    assert_eq!(room.room_number, "201");
}

#[tokio::test]
async fn editing_an_unknown_room_is_not_found() {
    let db = TestDatabase::seeded().await;
    let draft = RoomDraft::new("901", "Suite", 1.0).expect("draft");

    let err = db
        .rooms()
        .update_room(RoomId::new(900), &draft)
        .await
        .expect_err("no such room");

    assert!(matches!(err, RoomRepositoryError::NotFound { .. }));
}

#[tokio::test]
async fn check_in_requires_an_available_room() {
    let db = TestDatabase::seeded().await;
    let cleaning = db.room_id("201").await;

    let err = db
        .guests()
        .check_in(&stay("Alan Turing", cleaning))
        .await
        .expect_err("room is being cleaned");

    assert!(matches!(
        err,
        GuestRepositoryError::RoomUnavailable {
            status: RoomStatus::Cleaning,
            ..
        }
    ));
    assert!(db.guests().list_active().await.expect("guests").is_empty());
}

#[tokio::test]
async fn check_in_to_unknown_room_is_not_found() {
    let db = TestDatabase::seeded().await;

    let err = db
        .guests()
        .check_in(&stay("Alan Turing", RoomId::new(999)))
        .await
        .expect_err("no such room");

    assert!(matches!(err, GuestRepositoryError::RoomNotFound { .. }));
}

#[tokio::test]
async fn checkout_sends_the_room_to_cleaning() {
    let db = TestDatabase::seeded().await;
    let room_id = db.room_id("301").await;
    let guest = db
        .guests()
        .check_in(&stay("Ada Lovelace", room_id))
        .await
        .expect("check in");

    let outcome = db
        .guests()
        .check_out(guest.id, Utc::now())
        .await
        .expect("check out");

    assert_eq!(outcome.room_id, room_id);
    let room = db.rooms().find_room(room_id).await.expect("find").expect("room");
    assert_eq!(room.status, RoomStatus::Cleaning);
    let stay = db.guests().find_stay(guest.id).await.expect("stay").expect("guest");
    assert_eq!(stay.guest.status, GuestStatus::CheckedOut);

    let tasks = db.tasks().list_tasks(None).await.expect("tasks");
    assert_eq!(tasks.len(), 1);
    let task = &tasks[0].task;
    assert_eq!(task.id, outcome.cleaning_task_id);
    assert_eq!(task.task_type, TaskType::Cleaning);
    assert_eq!(task.status, TaskStatus::Pending);
    assert_eq!(task.description, "Cleaning after guest checkout");
}

#[tokio::test]
async fn repeated_checkout_writes_nothing() {
    let db = TestDatabase::seeded().await;
    let room_id = db.room_id("101").await;
    let guest = db
        .guests()
        .check_in(&stay("Ada Lovelace", room_id))
        .await
        .expect("check in");
    db.guests().check_out(guest.id, Utc::now()).await.expect("first checkout");

    let err = db
        .guests()
        .check_out(guest.id, Utc::now())
        .await
        .expect_err("already checked out");

    assert!(matches!(err, GuestRepositoryError::AlreadyCheckedOut { .. }));
    assert_eq!(db.tasks().list_tasks(None).await.expect("tasks").len(), 1);
}

#[tokio::test]
async fn unknown_guest_checkout_is_not_found() {
    let db = TestDatabase::seeded().await;

    let err = db
        .guests()
        .check_out(GuestId::new(42), Utc::now())
        .await
        .expect_err("no such guest");

    assert!(matches!(err, GuestRepositoryError::GuestNotFound { .. }));
    assert!(db.tasks().list_tasks(None).await.expect("tasks").is_empty());
}

#[tokio::test]
async fn deleting_an_occupied_room_is_refused() {
    let db = TestDatabase::seeded().await;
    let room_id = db.room_id("101").await;
    db.guests()
        .check_in(&stay("Ada Lovelace", room_id))
        .await
        .expect("check in");

    let err = db.rooms().delete_room(room_id).await.expect_err("room in use");

    assert!(matches!(err, RoomRepositoryError::Occupied { .. }));
    assert!(db.rooms().find_room(room_id).await.expect("find").is_some());
}

#[tokio::test]
async fn deleting_a_free_room_succeeds() {
    let db = TestDatabase::seeded().await;
    let room_id = db.room_id("301").await;

    db.rooms().delete_room(room_id).await.expect("delete");

    assert!(db.rooms().find_room(room_id).await.expect("find").is_none());
}

#[rstest]
#[case("cleaning", RoomStatus::Available)]
#[case("maintenance", RoomStatus::Cleaning)]
#[tokio::test]
async fn completing_a_task_releases_only_cleaned_rooms(
    #[case] task_type: &str,
    #[case] expected: RoomStatus,
) {
    let db = TestDatabase::seeded().await;
    let room_id = db.room_id("201").await;
    let draft = TaskDraft::new(room_id, task_type, "Scheduled work", None).expect("draft");
    let task = db.tasks().create_task(&draft, Utc::now()).await.expect("create");

    let completion = db
        .tasks()
        .complete_task(task.id, Utc::now())
        .await
        .expect("complete");

    assert_eq!(completion.room_released, expected == RoomStatus::Available);
    let room = db.rooms().find_room(room_id).await.expect("find").expect("room");
    assert_eq!(room.status, expected);
}

#[tokio::test]
async fn task_transitions_follow_the_lifecycle() {
    let db = TestDatabase::seeded().await;
    let room_id = db.room_id("202").await;
    let draft = TaskDraft::new(room_id, "maintenance", "Fix the tap", Some("Sam".to_owned()))
        .expect("draft");
    let task = db.tasks().create_task(&draft, Utc::now()).await.expect("create");

    let started = db.tasks().start_task(task.id).await.expect("start");
    assert_eq!(started.status, TaskStatus::InProgress);

    let restart = db.tasks().start_task(task.id).await.expect_err("already started");
    assert!(matches!(restart, TaskRepositoryError::InvalidTransition { .. }));

    db.tasks().complete_task(task.id, Utc::now()).await.expect("complete");
    let again = db
        .tasks()
        .complete_task(task.id, Utc::now())
        .await
        .expect_err("already completed");
    assert!(matches!(again, TaskRepositoryError::InvalidTransition { .. }));

    let counts = db.tasks().count_by_status().await.expect("counts");
    assert_eq!(counts.get(TaskStatus::Completed), 1);
    assert_eq!(counts.get(TaskStatus::Pending), 0);
}

#[tokio::test]
async fn unknown_tasks_are_not_found() {
    let db = TestDatabase::seeded().await;

    let err = db.tasks().start_task(TaskId::new(77)).await.expect_err("no task");

    assert!(matches!(err, TaskRepositoryError::TaskNotFound { .. }));
}

#[tokio::test]
async fn quality_scores_respect_the_window() {
    let db = TestDatabase::seeded().await;
    let room_id = db.room_id("101").await;
    let now = Utc::now();
    let recent = QualityCheckDraft::new(room_id, (9, 8, 7), "", "Inspector").expect("draft");
    let stale = QualityCheckDraft::new(room_id, (1, 1, 1), "old", "Inspector").expect("draft");
    db.checks().record(&recent, now).await.expect("recent check");
    db.checks()
        .record(&stale, now - Duration::days(45))
        .await
        .expect("stale check");

    let scores = db
        .checks()
        .scores_since(now - Duration::days(30))
        .await
        .expect("scores");
    assert_eq!(scores.len(), 1);
    assert!((scores[0].overall() - 8.0).abs() < f64::EPSILON);

    let listing = db.checks().recent(10).await.expect("recent");
    assert_eq!(listing.len(), 2);
    assert_eq!(listing[0].room_number.as_deref(), Some("101"));
}

#[tokio::test]
async fn quality_checks_need_an_existing_room() {
    let db = TestDatabase::seeded().await;
    let draft =
        QualityCheckDraft::new(RoomId::new(500), (5, 5, 5), "", "Inspector").expect("draft");

    let err = db.checks().record(&draft, Utc::now()).await.expect_err("no room");

    assert!(matches!(err, QualityCheckRepositoryError::RoomNotFound { .. }));
}

#[tokio::test]
async fn revenue_counts_todays_active_check_ins() {
    let db = TestDatabase::seeded().await;
    let standard = db.room_id("101").await;
    let suite = db.room_id("301").await;
    db.guests().check_in(&stay("A", standard)).await.expect("check in");
    db.guests().check_in(&stay("B", suite)).await.expect("check in");

    let revenue = db
        .guests()
        .revenue_for_check_in_date(today())
        .await
        .expect("revenue");

    assert!((revenue - 1_100_000.0).abs() < f64::EPSILON);
}
