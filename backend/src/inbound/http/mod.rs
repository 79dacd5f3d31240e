//! HTTP inbound adapter.
//!
//! Page routes return their view model as JSON together with any pending
//! flash notice. Form routes run one lifecycle operation, flash its outcome
//! and answer `303 See Other`. The `/api` routes serve JSON for dashboard
//! polling.

pub mod api;
pub mod dashboard;
pub mod error;
pub mod guests;
pub mod health;
pub mod notice;
pub mod quality;
pub mod rooms;
pub mod state;
pub mod tasks;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every page, form and API route.
///
/// Form bodies that cannot be decoded flash an error notice. Health probes
/// are registered separately so they stay outside the session middleware.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().error_handler(notice::form_error_handler))
        .service(dashboard::dashboard)
        .service(dashboard::reports)
        .service(rooms::list_rooms)
        .service(rooms::update_room_status)
        .service(rooms::add_room_form)
        .service(rooms::add_room)
        .service(rooms::edit_room_form)
        .service(rooms::edit_room)
        .service(rooms::delete_room)
        .service(guests::list_guests)
        .service(guests::check_in_form)
        .service(guests::check_in)
        .service(guests::check_out)
        .service(guests::guest_details)
        .service(tasks::list_tasks)
        .service(tasks::create_task)
        .service(tasks::complete_task)
        .service(tasks::update_task_status)
        .service(quality::quality_page)
        .service(quality::record_check)
        .service(api::room_status)
        .service(api::dashboard_stats);
}
