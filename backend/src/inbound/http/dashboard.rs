//! Dashboard and report page handlers.
//!
//! ```text
//! GET /          room status counts, recent tasks, 30-day quality averages
//! GET /reports   occupancy, revenue, task completion, quality and activity
//! ```

use actix_web::{HttpResponse, get, web};

use crate::inbound::http::ApiResult;
use crate::inbound::http::notice::FlashContext;
use crate::inbound::http::state::HttpState;

/// Dashboard; room statuses are reconciled before counting.
#[get("/")]
pub async fn dashboard(
    state: web::Data<HttpState>,
    flash: FlashContext,
) -> ApiResult<HttpResponse> {
    let view = state.reporting.dashboard().await?;
    Ok(HttpResponse::Ok().json(flash.page(view)))
}

#[get("/reports")]
pub async fn reports(
    state: web::Data<HttpState>,
    flash: FlashContext,
) -> ApiResult<HttpResponse> {
    let view = state.reporting.report().await?;
    Ok(HttpResponse::Ok().json(flash.page(view)))
}
