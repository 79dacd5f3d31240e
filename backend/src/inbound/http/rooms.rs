//! Room listing and room administration handlers.
//!
//! ```text
//! GET  /rooms                      room list (reconciled first)
//! POST /update_room_status         form: room_id, status
//! GET  /add_room                   empty form page
//! POST /add_room                   form: room_number, room_type, price
//! GET  /edit_room/{room_id}        room form page
//! POST /edit_room/{room_id}        form: room_number, room_type, price
//! GET  /delete_room/{room_id}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, ErrorCode, Room, RoomDraft, RoomId, RoomStatus, RoomValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::notice::{FlashContext, Notice};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_value_error, parse_integer, parse_number, required,
};

const ROOMS_PATH: &str = "/rooms";

const ROOM_ID: FieldName = FieldName::new("room_id");
const STATUS: FieldName = FieldName::new("status");
const ROOM_NUMBER: FieldName = FieldName::new("room_number");
const ROOM_TYPE: FieldName = FieldName::new("room_type");
const PRICE: FieldName = FieldName::new("price");

#[derive(Debug, Serialize)]
struct RoomsView {
    rooms: Vec<Room>,
}

#[derive(Debug, Serialize)]
struct RoomView {
    room: Room,
}

#[derive(Debug, Serialize)]
struct RoomFormView {
    statuses: [RoomStatus; 4],
}

/// Form body for `POST /update_room_status`.
#[derive(Debug, Default, Deserialize)]
pub struct RoomStatusForm {
    pub room_id: Option<String>,
    pub status: Option<String>,
}

/// Form body for `POST /add_room` and `POST /edit_room/{room_id}`.
#[derive(Debug, Default, Deserialize)]
pub struct RoomForm {
    pub room_number: Option<String>,
    pub room_type: Option<String>,
    pub price: Option<String>,
}

impl RoomForm {
    fn into_draft(self) -> Result<RoomDraft, Error> {
        let number = required(self.room_number, ROOM_NUMBER)?;
        let room_type = required(self.room_type, ROOM_TYPE)?;
        let price = parse_number(self.price, PRICE)?;
        RoomDraft::new(number, room_type, price).map_err(|err| {
            let field = match err {
                RoomValidationError::EmptyNumber => ROOM_NUMBER,
                RoomValidationError::EmptyType => ROOM_TYPE,
                RoomValidationError::InvalidPrice(_) => PRICE,
            };
            invalid_value_error(field, err)
        })
    }
}

impl RoomStatusForm {
    fn parse(self) -> Result<(RoomId, RoomStatus), Error> {
        let room_id = RoomId::new(parse_integer(self.room_id, ROOM_ID)?);
        let status = required(self.status, STATUS)?
            .trim()
            .parse::<RoomStatus>()
            .map_err(|err| invalid_value_error(STATUS, err))?;
        Ok((room_id, status))
    }
}

/// Room list with statuses reconciled against active guests.
#[get("/rooms")]
pub async fn list_rooms(
    state: web::Data<HttpState>,
    flash: FlashContext,
) -> ApiResult<HttpResponse> {
    let rooms = state.rooms.list_rooms().await?;
    Ok(HttpResponse::Ok().json(flash.page(RoomsView { rooms })))
}

/// Set a room's status by hand, typically to `cleaning` or `maintenance`.
#[post("/update_room_status")]
pub async fn update_room_status(
    state: web::Data<HttpState>,
    flash: FlashContext,
    form: web::Form<RoomStatusForm>,
) -> HttpResponse {
    let outcome = async {
        let (room_id, status) = form.into_inner().parse()?;
        let room = state.rooms.set_room_status(room_id, status).await?;
        Ok::<_, Error>(format!("Room {} is now {}", room.room_number, room.status))
    }
    .await;
    flash.settle(outcome, ROOMS_PATH, ROOMS_PATH)
}

#[get("/add_room")]
pub async fn add_room_form(flash: FlashContext) -> HttpResponse {
    HttpResponse::Ok().json(flash.page(RoomFormView {
        statuses: RoomStatus::ALL,
    }))
}

/// Create a room. New rooms start `available`.
#[post("/add_room")]
pub async fn add_room(
    state: web::Data<HttpState>,
    flash: FlashContext,
    form: web::Form<RoomForm>,
) -> HttpResponse {
    let outcome = async {
        let draft = form.into_inner().into_draft()?;
        let room = state.rooms.add_room(draft).await?;
        Ok::<_, Error>(format!("Room {} added", room.room_number))
    }
    .await;
    flash.settle(outcome, ROOMS_PATH, "/add_room")
}

/// Edit form for one room. An unknown room sends the user back to the list.
#[get("/edit_room/{room_id}")]
pub async fn edit_room_form(
    state: web::Data<HttpState>,
    flash: FlashContext,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let room_id = RoomId::new(path.into_inner());
    match state.rooms.room(room_id).await {
        Ok(room) => Ok(HttpResponse::Ok().json(flash.page(RoomView { room }))),
        Err(err) if err.code() == ErrorCode::NotFound => {
            Ok(flash.redirect(&Notice::from_error(&err), ROOMS_PATH))
        }
        Err(err) => Err(err),
    }
}

#[post("/edit_room/{room_id}")]
pub async fn edit_room(
    state: web::Data<HttpState>,
    flash: FlashContext,
    path: web::Path<i32>,
    form: web::Form<RoomForm>,
) -> HttpResponse {
    let room_id = RoomId::new(path.into_inner());
    let outcome = async {
        let draft = form.into_inner().into_draft()?;
        let room = state.rooms.edit_room(room_id, draft).await?;
        Ok::<_, Error>(format!("Room {} updated", room.room_number))
    }
    .await;
    flash.settle(outcome, ROOMS_PATH, &format!("/edit_room/{room_id}"))
}

/// Delete a room that has no active guest.
#[get("/delete_room/{room_id}")]
pub async fn delete_room(
    state: web::Data<HttpState>,
    flash: FlashContext,
    path: web::Path<i32>,
) -> HttpResponse {
    let room_id = RoomId::new(path.into_inner());
    let outcome = state
        .rooms
        .delete_room(room_id)
        .await
        .map(|()| format!("Room {room_id} deleted"));
    flash.settle(outcome, ROOMS_PATH, ROOMS_PATH)
}
