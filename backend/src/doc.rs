//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] covers the JSON surface: the dashboard polling endpoints and the
//! health probes. Page and form routes return view models for a renderer and
//! are not part of the published API. Swagger UI serves the document in debug
//! builds.

use utoipa::OpenApi;

use crate::domain::{DashboardStats, Error, ErrorCode, RoomStatus, TaskStatus};
use crate::inbound::http::api::{ApiNotFound, RoomStatusResponse};

/// OpenAPI document for the JSON API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Hotel operations API",
        description = "Room status and dashboard statistics for polling clients, plus health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::api::room_status,
        crate::inbound::http::api::dashboard_stats,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        RoomStatusResponse,
        ApiNotFound,
        DashboardStats,
        RoomStatus,
        TaskStatus,
        Error,
        ErrorCode
    )),
    tags(
        (name = "api", description = "Dashboard polling endpoints"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
