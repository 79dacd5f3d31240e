//! Front desk handlers: guest list, check-in, checkout and guest details.
//!
//! ```text
//! GET  /guests                     active guests with room numbers
//! GET  /checkin                    rooms available for check-in
//! POST /checkin                    form: name, phone, email, room_id, check_in, check_out
//! GET  /checkout/{guest_id}
//! GET  /guest_details/{guest_id}   stay length and total cost
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{
    CheckInDraft, CheckInFields, Error, ErrorCode, GuestDetails, GuestId, GuestListing,
    GuestValidationError, Room, RoomId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::notice::{FlashContext, Notice};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_value_error, parse_date, parse_integer, required,
};

const GUESTS_PATH: &str = "/guests";
const CHECK_IN_PATH: &str = "/checkin";

const NAME: FieldName = FieldName::new("name");
const ROOM_ID: FieldName = FieldName::new("room_id");
const CHECK_IN: FieldName = FieldName::new("check_in");
const CHECK_OUT: FieldName = FieldName::new("check_out");

#[derive(Debug, Serialize)]
struct GuestsView {
    guests: Vec<GuestListing>,
}

#[derive(Debug, Serialize)]
struct CheckInView {
    rooms: Vec<Room>,
}

#[derive(Debug, Serialize)]
struct GuestDetailsView {
    details: GuestDetails,
}

/// Form body for `POST /checkin`.
#[derive(Debug, Default, Deserialize)]
pub struct CheckInForm {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub room_id: Option<String>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
}

impl CheckInForm {
    fn into_draft(self) -> Result<CheckInDraft, Error> {
        let fields = CheckInFields {
            name: required(self.name, NAME)?,
            phone: self.phone,
            email: self.email,
            room_id: RoomId::new(parse_integer(self.room_id, ROOM_ID)?),
            check_in: parse_date(self.check_in, CHECK_IN)?,
            check_out: parse_date(self.check_out, CHECK_OUT)?,
        };
        CheckInDraft::new(fields).map_err(|err| {
            let field = match err {
                GuestValidationError::EmptyName => NAME,
                GuestValidationError::StayNotPositive { .. } => CHECK_OUT,
            };
            invalid_value_error(field, err)
        })
    }
}

#[get("/guests")]
pub async fn list_guests(
    state: web::Data<HttpState>,
    flash: FlashContext,
) -> ApiResult<HttpResponse> {
    let guests = state.front_desk.active_guests().await?;
    Ok(HttpResponse::Ok().json(flash.page(GuestsView { guests })))
}

/// Check-in form listing the rooms a guest can be placed in.
#[get("/checkin")]
pub async fn check_in_form(
    state: web::Data<HttpState>,
    flash: FlashContext,
) -> ApiResult<HttpResponse> {
    let rooms = state.rooms.available_rooms().await?;
    Ok(HttpResponse::Ok().json(flash.page(CheckInView { rooms })))
}

#[post("/checkin")]
pub async fn check_in(
    state: web::Data<HttpState>,
    flash: FlashContext,
    form: web::Form<CheckInForm>,
) -> HttpResponse {
    let outcome = async {
        let draft = form.into_inner().into_draft()?;
        let guest = state.front_desk.check_in(draft).await?;
        Ok::<_, Error>(format!("{} checked in", guest.name))
    }
    .await;
    flash.settle(outcome, GUESTS_PATH, CHECK_IN_PATH)
}

/// Check a guest out; the room goes to cleaning.
#[get("/checkout/{guest_id}")]
pub async fn check_out(
    state: web::Data<HttpState>,
    flash: FlashContext,
    path: web::Path<i32>,
) -> HttpResponse {
    let guest_id = GuestId::new(path.into_inner());
    let outcome = state
        .front_desk
        .check_out(guest_id)
        .await
        .map(|_| "Guest checked out. Room sent for cleaning.".to_owned());
    flash.settle(outcome, GUESTS_PATH, GUESTS_PATH)
}

/// Guest with room, stay length in nights and total cost.
#[get("/guest_details/{guest_id}")]
pub async fn guest_details(
    state: web::Data<HttpState>,
    flash: FlashContext,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let guest_id = GuestId::new(path.into_inner());
    match state.front_desk.guest_details(guest_id).await {
        Ok(details) => Ok(HttpResponse::Ok().json(flash.page(GuestDetailsView { details }))),
        Err(err) if err.code() == ErrorCode::NotFound => {
            Ok(flash.redirect(&Notice::from_error(&err), GUESTS_PATH))
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn form() -> CheckInForm {
        CheckInForm {
            name: Some("Ada Lovelace".to_owned()),
            phone: Some(String::new()),
            email: Some("ada@example.com".to_owned()),
            room_id: Some("1".to_owned()),
            check_in: Some("2026-03-14".to_owned()),
            check_out: Some("2026-03-17".to_owned()),
        }
    }

    fn failing_field(form: CheckInForm) -> Option<String> {
        let err = form.into_draft().expect_err("invalid check-in");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        err.details()
            .and_then(|d| d.get("field"))
            .and_then(|f| f.as_str())
            .map(str::to_owned)
    }

    #[rstest]
    fn valid_form_counts_nights(form: CheckInForm) {
        let draft = form.into_draft().expect("valid check-in");
        assert_eq!(draft.nights(), 3);
        assert_eq!(draft.phone(), None);
    }

    #[rstest]
    fn reversed_dates_blame_check_out(mut form: CheckInForm) {
        form.check_out = Some("2026-03-14".to_owned());
        assert_eq!(failing_field(form).as_deref(), Some("check_out"));
    }

    #[rstest]
    fn non_numeric_room_is_a_bad_request(mut form: CheckInForm) {
        form.room_id = Some("suite".to_owned());
        assert_eq!(failing_field(form).as_deref(), Some("room_id"));
    }

    #[rstest]
    fn missing_name_is_a_bad_request(mut form: CheckInForm) {
        form.name = None;
        assert_eq!(failing_field(form).as_deref(), Some("name"));
    }
}
