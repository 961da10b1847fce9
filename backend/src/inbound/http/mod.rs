//! HTTP inbound adapter exposing the Mock API as REST endpoints.

pub mod auth;
pub mod dashboard;
pub mod error;
pub mod health;
pub mod registration;
pub mod session;
pub mod session_config;
pub mod state;
pub mod support;
#[cfg(test)]
pub mod test_utils;
mod validation;
pub mod verify;
pub mod workers;

use actix_web::web;

pub use error::ApiResult;

/// Register every API endpoint plus the JSON and query error handlers.
///
/// Mount under `/api/v1`; health probes are registered separately.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use migii::inbound::http::configure;
///
/// let app = App::new().service(web::scope("/api/v1").configure(configure));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .service(auth::admin_login)
        .service(auth::request_worker_otp)
        .service(auth::worker_login)
        .service(auth::logout)
        .service(registration::get_registration)
        .service(registration::reset_registration)
        .service(registration::update_fields)
        .service(registration::attach_photo)
        .service(registration::next_step)
        .service(registration::prev_step)
        .service(registration::send_registration_otp)
        .service(registration::submit_registration)
        .service(workers::list_workers)
        .service(workers::get_worker)
        .service(workers::update_worker)
        .service(workers::delete_worker)
        .service(support::list_support_requests)
        .service(support::update_support_request)
        .service(support::resolve_support_request)
        .service(dashboard::admin_overview)
        .service(dashboard::worker_dashboard)
        .service(dashboard::create_support_request)
        .service(verify::verify_worker);
}
