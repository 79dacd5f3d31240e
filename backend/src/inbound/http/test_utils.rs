//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::web;

use crate::domain::ports::{
    MockFrontDesk, MockHotelReporting, MockHousekeeping, MockQualityInspections,
    MockRoomAdministration,
};
use crate::inbound::http::state::HttpState;

/// Build a session middleware configured for tests.
///
/// Generates a fresh key per invocation and disables the `Secure` flag for
/// local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The session cookie set by `res`, if the session changed.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(|cookie| cookie.into_owned())
}

/// Mocked driving ports for handler tests; set expectations, then call
/// [`TestPorts::into_state`].
#[derive(Default)]
pub struct TestPorts {
    pub rooms: MockRoomAdministration,
    pub front_desk: MockFrontDesk,
    pub housekeeping: MockHousekeeping,
    pub quality: MockQualityInspections,
    pub reporting: MockHotelReporting,
}

impl TestPorts {
    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState {
            rooms: Arc::new(self.rooms),
            front_desk: Arc::new(self.front_desk),
            housekeeping: Arc::new(self.housekeeping),
            quality: Arc::new(self.quality),
            reporting: Arc::new(self.reporting),
        })
    }
}
