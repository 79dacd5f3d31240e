//! JSON polling endpoints used by the dashboard.
//!
//! ```text
//! GET /api/room_status/{room_id}
//! GET /api/dashboard_stats
//! ```

use actix_web::{HttpResponse, get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{DashboardStats, ErrorCode, Room, RoomId, RoomStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Current state of one room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RoomStatusResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "101")]
    pub room_number: String,
    pub status: RoomStatus,
    #[schema(example = "Standard")]
    pub room_type: String,
    #[schema(example = 350000.0)]
    pub price: f64,
}

impl From<Room> for RoomStatusResponse {
    fn from(room: Room) -> Self {
        Self {
            id: room.id.get(),
            room_number: room.room_number,
            status: room.status,
            room_type: room.room_type,
            price: room.price,
        }
    }
}

/// Body of a `404` from the polling API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ApiNotFound {
    #[schema(example = "Room not found")]
    pub error: String,
}

/// Status of one room, without reconciliation.
#[utoipa::path(
    get,
    path = "/api/room_status/{room_id}",
    params(("room_id" = i32, Path, description = "Room identifier")),
    responses(
        (status = 200, description = "Room found", body = RoomStatusResponse),
        (status = 404, description = "Room not found", body = ApiNotFound),
        (status = 503, description = "Store unavailable", body = crate::domain::Error),
        (status = 500, description = "Internal server error", body = crate::domain::Error)
    ),
    tags = ["api"],
    operation_id = "roomStatus"
)]
#[get("/api/room_status/{room_id}")]
pub async fn room_status(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    match state.rooms.room(RoomId::new(path.into_inner())).await {
        Ok(room) => Ok(HttpResponse::Ok().json(RoomStatusResponse::from(room))),
        Err(err) if err.code() == ErrorCode::NotFound => {
            Ok(HttpResponse::NotFound().json(ApiNotFound {
                error: "Room not found".to_owned(),
            }))
        }
        Err(err) => Err(err),
    }
}

/// Room and task status counts with the time they were taken.
#[utoipa::path(
    get,
    path = "/api/dashboard_stats",
    responses(
        (status = 200, description = "Current counts", body = DashboardStats),
        (status = 503, description = "Store unavailable", body = crate::domain::Error),
        (status = 500, description = "Internal server error", body = crate::domain::Error)
    ),
    tags = ["api"],
    operation_id = "dashboardStats"
)]
#[get("/api/dashboard_stats")]
pub async fn dashboard_stats(state: web::Data<HttpState>) -> ApiResult<web::Json<DashboardStats>> {
    state.reporting.dashboard_stats().await.map(web::Json)
}
