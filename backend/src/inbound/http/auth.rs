//! Login and logout handlers for workers and administrators.
//!
//! ```text
//! POST /api/v1/auth/admin/login {"email":"admin@migii.com","password":"admin123"}
//! POST /api/v1/auth/worker/otp {"phone":"9876543210"}
//! POST /api/v1/auth/worker/login {"phone":"9876543210","otp":"123456"}
//! POST /api/v1/auth/logout
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::OtpDispatch;
use crate::domain::{AdminUser, Error, WorkerId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_admin_credentials, parse_login_otp, parse_phone};

/// Admin login body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminLoginRequest {
    #[schema(example = "admin@migii.com")]
    pub email: String,
    #[schema(example = "admin123")]
    pub password: String,
}

/// Request a login code for a registered phone.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OtpRequest {
    #[schema(example = "9876543210")]
    pub phone: String,
}

/// Acknowledgement shown after a code was sent.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OtpNotice {
    #[schema(example = "OTP sent successfully to your phone")]
    pub message: String,
    pub demo_mode: bool,
}

/// Worker login body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkerLoginRequest {
    #[schema(example = "9876543210")]
    pub phone: String,
    #[schema(example = "123456")]
    pub otp: String,
}

/// Identity established by a worker login.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkerSession {
    #[schema(value_type = String, example = "1")]
    pub worker_id: WorkerId,
}

/// Authenticate an administrator and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/admin/login",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "Login success", body = AdminUser,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 503, description = "Admin directory unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "adminLogin",
    security([])
)]
#[post("/auth/admin/login")]
pub async fn admin_login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<AdminLoginRequest>,
) -> ApiResult<web::Json<AdminUser>> {
    let AdminLoginRequest { email, password } = payload.into_inner();
    let credentials = parse_admin_credentials(&email, &password)?;
    let admin = state
        .admin_login
        .admin_login(&credentials)
        .await?
        .ok_or_else(|| Error::unauthorized("Invalid credentials. Please try again."))?;
    session.persist_admin(&admin)?;
    Ok(web::Json(admin))
}

/// Send a login code to a registered worker.
#[utoipa::path(
    post,
    path = "/api/v1/auth/worker/otp",
    request_body = OtpRequest,
    responses(
        (status = 200, description = "Code sent", body = OtpNotice),
        (status = 400, description = "Invalid phone number", body = Error),
        (status = 404, description = "No worker with this phone", body = Error),
        (status = 503, description = "SMS gateway unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "requestWorkerOtp",
    security([])
)]
#[post("/auth/worker/otp")]
pub async fn request_worker_otp(
    state: web::Data<HttpState>,
    payload: web::Json<OtpRequest>,
) -> ApiResult<web::Json<OtpNotice>> {
    let phone = parse_phone(&payload.phone)?;
    let dispatch = state
        .worker_login
        .request_login_otp(&phone)
        .await?
        .ok_or_else(|| {
            Error::not_found("No worker found with this phone number. Please register first.")
        })?;
    Ok(web::Json(OtpNotice {
        message: dispatch.notice().to_owned(),
        demo_mode: dispatch == OtpDispatch::SentInDemoMode,
    }))
}

/// Sign a worker in with the code sent to their phone.
#[utoipa::path(
    post,
    path = "/api/v1/auth/worker/login",
    request_body = WorkerLoginRequest,
    responses(
        (status = 200, description = "Login success", body = WorkerSession,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Malformed phone or code", body = Error),
        (status = 401, description = "Code refused", body = Error)
    ),
    tags = ["auth"],
    operation_id = "workerLogin",
    security([])
)]
#[post("/auth/worker/login")]
pub async fn worker_login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<WorkerLoginRequest>,
) -> ApiResult<web::Json<WorkerSession>> {
    let phone = parse_phone(&payload.phone)?;
    let otp = parse_login_otp(&payload.otp)?;
    let worker_id = state
        .worker_login
        .login_with_otp(&phone, &otp)
        .await?
        .ok_or_else(|| Error::unauthorized("Invalid OTP. Please try again."))?;
    session.persist_worker(&worker_id)?;
    Ok(web::Json(WorkerSession { worker_id }))
}

/// End the current session, whoever holds it.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses((status = 204, description = "Signed out")),
    tags = ["auth"],
    operation_id = "logout"
)]
#[post("/auth/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
