//! End-to-end HTTP flows over a real SQLite database.
//!
//! Requests run through the same middleware stack as the server: `Trace`
//! outermost, then a cookie session around the page and form routes.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use serde_json::Value;

use hotel_ops::Trace;
use hotel_ops::domain::TRACE_ID_HEADER;
use hotel_ops::inbound::http;

mod support;

use support::{TestDatabase, today};

fn app(
    db: &TestDatabase,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();
    App::new()
        .app_data(web::Data::new(db.http_state()))
        .wrap(Trace)
        .service(web::scope("").wrap(session).configure(http::configure))
}

fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

fn location<B>(res: &ServiceResponse<B>) -> &str {
    res.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("location header")
}

/// Request for the redirect target, carrying the session cookie it set.
fn follow<B>(res: &ServiceResponse<B>) -> test::TestRequest {
    let req = test::TestRequest::get().uri(location(res));
    match session_cookie(res) {
        Some(cookie) => req.cookie(cookie),
        None => req,
    }
}

#[actix_web::test]
async fn check_in_flashes_success_once() {
    let db = TestDatabase::seeded().await;
    let room_id = db.room_id("101").await;
    let app = test::init_service(app(&db)).await;
    let check_in = today();
    let check_out = check_in.succ_opt().expect("date in range");

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/checkin")
            .set_form([
                ("name", "Ada Lovelace".to_owned()),
                ("phone", String::new()),
                ("email", "ada@example.com".to_owned()),
                ("room_id", room_id.to_string()),
                ("check_in", check_in.format("%Y-%m-%d").to_string()),
                ("check_out", check_out.format("%Y-%m-%d").to_string()),
            ])
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/guests");

    let page: Value = test::call_and_read_body_json(&app, follow(&res).to_request()).await;
    assert_eq!(page["notice"]["level"], "success");
    assert_eq!(page["notice"]["message"], "Ada Lovelace checked in");
    assert_eq!(page["guests"][0]["name"], "Ada Lovelace");
    assert_eq!(page["guests"][0]["room_number"], "101");

    let status: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/room_status/{room_id}"))
            .to_request(),
    )
    .await;
    assert_eq!(status["status"], "occupied");
}

#[actix_web::test]
async fn invalid_check_in_returns_to_the_form() {
    let db = TestDatabase::seeded().await;
    let app = test::init_service(app(&db)).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/checkin")
            .set_form([("name", "Ada"), ("room_id", "one"), ("check_in", "2026-03-14")])
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/checkin");

    let page: Value = test::call_and_read_body_json(&app, follow(&res).to_request()).await;
    assert_eq!(page["notice"]["level"], "error");
    assert!(page["rooms"].is_array());
}

#[actix_web::test]
async fn deleting_an_occupied_room_flashes_an_error() {
    let db = TestDatabase::seeded().await;
    let state = db.http_state();
    let room_id = db.room_id("301").await;
    state
        .front_desk
        .check_in(support::stay("Grace Hopper", room_id))
        .await
        .expect("check in");
    let app = test::init_service(app(&db)).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/delete_room/{room_id}"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/rooms");

    let page: Value = test::call_and_read_body_json(&app, follow(&res).to_request()).await;
    assert_eq!(page["notice"]["level"], "error");
    let rooms = page["rooms"].as_array().expect("rooms");
    assert!(rooms.iter().any(|room| room["room_number"] == "301"));
}

#[actix_web::test]
async fn editing_to_a_taken_number_returns_to_the_edit_form() {
    let db = TestDatabase::seeded().await;
    let room_id = db.room_id("201").await;
    let app = test::init_service(app(&db)).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/edit_room/{room_id}"))
            .set_form([("room_number", "301"), ("room_type", "Deluxe"), ("price", "500000")])
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    let edit_path = format!("/edit_room/{room_id}");
    assert_eq!(location(&res), edit_path);

    let page: Value = test::call_and_read_body_json(&app, follow(&res).to_request()).await;
    assert_eq!(page["notice"]["level"], "error");
    assert_eq!(page["room"]["room_number"], "201");
}

#[actix_web::test]
async fn form_without_urlencoded_body_flashes_an_error() {
    let db = TestDatabase::seeded().await;
    let app = test::init_service(app(&db)).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/create_task")
            .set_json(serde_json::json!({"room_id": 1, "task_type": "cleaning"}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/tasks");

    let page: Value = test::call_and_read_body_json(&app, follow(&res).to_request()).await;
    assert_eq!(page["notice"]["level"], "error");
    assert!(page["tasks"].as_array().expect("tasks").is_empty());
}

#[actix_web::test]
async fn checkout_and_cleaning_round_trip() {
    let db = TestDatabase::seeded().await;
    let state = db.http_state();
    let room_id = db.room_id("101").await;
    let guest = state
        .front_desk
        .check_in(support::stay("Grace Hopper", room_id))
        .await
        .expect("check in");
    let app = test::init_service(app(&db)).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/checkout/{}", guest.id))
            .to_request(),
    )
    .await;
    let page: Value = test::call_and_read_body_json(&app, follow(&res).to_request()).await;
    assert_eq!(
        page["notice"]["message"],
        "Guest checked out. Room sent for cleaning."
    );

    let tasks: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/tasks").to_request())
            .await;
    let task_id = tasks["tasks"][0]["id"].as_i64().expect("task id");
    assert_eq!(tasks["tasks"][0]["task_type"], "cleaning");

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/update_task_status/{task_id}/completed"))
            .to_request(),
    )
    .await;
    let page: Value = test::call_and_read_body_json(&app, follow(&res).to_request()).await;
    assert_eq!(
        page["notice"]["message"],
        format!("Task completed. Room {room_id} is available.")
    );
}

#[actix_web::test]
async fn unknown_task_status_is_rejected() {
    let db = TestDatabase::seeded().await;
    let app = test::init_service(app(&db)).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/update_task_status/1/archived")
            .to_request(),
    )
    .await;
    let page: Value = test::call_and_read_body_json(&app, follow(&res).to_request()).await;

    assert_eq!(page["notice"]["level"], "error");
}

#[actix_web::test]
async fn dashboard_stats_reflect_reconciled_rooms() {
    let db = TestDatabase::seeded().await;
    let app = test::init_service(app(&db)).await;

    // The dashboard view reconciles the guestless occupied seed room.
    let dashboard = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(dashboard.status(), StatusCode::OK);
    assert!(dashboard.headers().contains_key(TRACE_ID_HEADER));

    let stats: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/dashboard_stats").to_request(),
    )
    .await;
    assert_eq!(stats["room_stats"]["available"], 3);
    assert_eq!(stats["room_stats"]["occupied"], 0);
    assert_eq!(stats["task_stats"]["pending"], 0);
    assert!(stats["timestamp"].is_string());
}

#[actix_web::test]
async fn missing_api_room_is_a_json_404() {
    let db = TestDatabase::seeded().await;
    let app = test::init_service(app(&db)).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/room_status/999").to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "Room not found");
}
