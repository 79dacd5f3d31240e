//! One-shot flash notices carried in the session cookie.
//!
//! A form route records the outcome of its operation as a [`Notice`] and
//! answers `303 See Other`; the next page view takes the notice out of the
//! session and renders it alongside its view model.

use actix_session::{Session, SessionExt};
use actix_web::error::{InternalError, UrlencodedError};
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload};
use futures_util::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode};

pub(crate) const NOTICE_KEY: &str = "notice";

/// Severity of a flash notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Message shown once on the page a form redirects to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    /// Notice describing a failed operation.
    ///
    /// Internal failures are reported generically; their detail stays in the
    /// logs.
    pub fn from_error(error: &Error) -> Self {
        let message = match error.code() {
            ErrorCode::InternalError => "Internal server error".to_owned(),
            _ => error.message().to_owned(),
        };
        Self {
            level: NoticeLevel::Error,
            message,
        }
    }
}

/// Page payload: the pending notice, if any, plus the page's view model.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub notice: Option<Notice>,
    #[serde(flatten)]
    pub view: T,
}

/// Session wrapper exposing flash operations to handlers.
#[derive(Clone)]
pub struct FlashContext(Session);

impl FlashContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store `notice` for the next page view, replacing any unread one.
    pub fn push(&self, notice: &Notice) {
        if let Err(error) = self.0.insert(NOTICE_KEY, notice) {
            warn!(%error, "failed to store flash notice");
        }
    }

    /// Remove and return the pending notice.
    ///
    /// An unreadable notice is dropped rather than failing the page.
    pub fn take(&self) -> Option<Notice> {
        match self.0.remove_as::<Notice>(NOTICE_KEY) {
            Some(Ok(notice)) => Some(notice),
            Some(Err(raw)) => {
                warn!(raw = %raw, "discarding malformed flash notice");
                None
            }
            None => None,
        }
    }

    /// Wrap a view model with the pending notice.
    pub fn page<T: Serialize>(&self, view: T) -> Page<T> {
        Page {
            notice: self.take(),
            view,
        }
    }

    /// Record `notice` and redirect to `location`.
    pub fn redirect(&self, notice: &Notice, location: &str) -> HttpResponse {
        self.push(notice);
        see_other(location)
    }

    /// Flash the outcome of a form operation and redirect.
    ///
    /// Success goes to `on_success`, any domain error becomes an error notice
    /// and goes to `on_error`.
    pub fn settle(
        &self,
        outcome: Result<String, Error>,
        on_success: &str,
        on_error: &str,
    ) -> HttpResponse {
        match outcome {
            Ok(message) => self.redirect(&Notice::success(message), on_success),
            Err(error) => {
                warn!(code = ?error.code(), message = error.message(), "form operation rejected");
                self.redirect(&Notice::from_error(&error), on_error)
            }
        }
    }
}

/// `303 See Other` to `location`.
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.to_owned()))
        .finish()
}

/// View a form posted to `path` returns to when its body cannot be decoded.
fn form_origin(path: &str) -> &str {
    match path {
        "/update_room_status" => "/rooms",
        "/create_task" => "/tasks",
        other => other,
    }
}

/// `FormConfig` error handler: an undecodable form body becomes an error
/// notice and a redirect, like any other malformed input.
pub fn form_error_handler(err: UrlencodedError, req: &HttpRequest) -> actix_web::Error {
    let error = Error::invalid_request(format!("form could not be read: {err}"));
    warn!(path = req.path(), message = error.message(), "form body rejected");
    let flash = FlashContext::new(req.get_session());
    let response = flash.redirect(&Notice::from_error(&error), form_origin(req.path()));
    InternalError::from_response(err, response).into()
}

impl FromRequest for FlashContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(FlashContext::new) })
    }
}
