//! Quality inspection handlers.
//!
//! ```text
//! GET  /quality_check   rooms plus the most recent inspections
//! POST /quality_check   form: room_id, cleanliness_score, amenities_score,
//!                       maintenance_score, notes, checked_by
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{
    Error, QualityCheckDraft, QualityCheckListing, QualityValidationError, Room, RoomId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::notice::FlashContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_value_error, parse_integer, required};

const QUALITY_PATH: &str = "/quality_check";
/// Inspections shown under the form.
pub const RECENT_CHECKS_LIMIT: i64 = 10;

const ROOM_ID: FieldName = FieldName::new("room_id");
const CLEANLINESS: FieldName = FieldName::new("cleanliness_score");
const AMENITIES: FieldName = FieldName::new("amenities_score");
const MAINTENANCE: FieldName = FieldName::new("maintenance_score");
const CHECKED_BY: FieldName = FieldName::new("checked_by");

#[derive(Debug, Serialize)]
struct QualityView {
    rooms: Vec<Room>,
    recent_checks: Vec<QualityCheckListing>,
}

/// Form body for `POST /quality_check`.
#[derive(Debug, Default, Deserialize)]
pub struct QualityCheckForm {
    pub room_id: Option<String>,
    pub cleanliness_score: Option<String>,
    pub amenities_score: Option<String>,
    pub maintenance_score: Option<String>,
    pub notes: Option<String>,
    pub checked_by: Option<String>,
}

impl QualityCheckForm {
    fn into_draft(self) -> Result<QualityCheckDraft, Error> {
        let room_id = RoomId::new(parse_integer(self.room_id, ROOM_ID)?);
        let scores = (
            parse_integer(self.cleanliness_score, CLEANLINESS)?,
            parse_integer(self.amenities_score, AMENITIES)?,
            parse_integer(self.maintenance_score, MAINTENANCE)?,
        );
        let checked_by = required(self.checked_by, CHECKED_BY)?;
        let notes = self.notes.unwrap_or_default();
        QualityCheckDraft::new(room_id, scores, notes, checked_by).map_err(|err| {
            let field = match &err {
                QualityValidationError::ScoreOutOfRange { category, .. } => match *category {
                    "amenities" => AMENITIES,
                    "maintenance" => MAINTENANCE,
                    _ => CLEANLINESS,
                },
                QualityValidationError::EmptyInspector => CHECKED_BY,
            };
            invalid_value_error(field, err)
        })
    }
}

#[get("/quality_check")]
pub async fn quality_page(
    state: web::Data<HttpState>,
    flash: FlashContext,
) -> ApiResult<HttpResponse> {
    let rooms = state.rooms.list_rooms().await?;
    let recent_checks = state.quality.recent_checks(RECENT_CHECKS_LIMIT).await?;
    Ok(HttpResponse::Ok().json(flash.page(QualityView {
        rooms,
        recent_checks,
    })))
}

#[post("/quality_check")]
pub async fn record_check(
    state: web::Data<HttpState>,
    flash: FlashContext,
    form: web::Form<QualityCheckForm>,
) -> HttpResponse {
    let outcome = async {
        let draft = form.into_inner().into_draft()?;
        let check = state.quality.record_check(draft).await?;
        Ok::<_, Error>(format!(
            "Quality check saved (overall {:.1})",
            check.scores.overall()
        ))
    }
    .await;
    flash.settle(outcome, QUALITY_PATH, QUALITY_PATH)
}
