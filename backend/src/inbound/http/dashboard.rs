//! Dashboard handlers for administrators and signed-in workers.
//!
//! ```text
//! GET  /api/v1/admin/overview
//! GET  /api/v1/me
//! POST /api/v1/me/support-requests {"message":"Need help"}
//! ```

use actix_web::{HttpResponse, get, post, web};
use futures_util::try_join;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AdminOverview, Error, SupportRequestRecord, WorkerDashboard};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_support_message;

/// New ticket body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewSupportRequestBody {
    #[schema(example = "Need assistance with payment issues")]
    pub message: String,
}

/// Counts, monthly series and full listings for the admin dashboard.
///
/// Workers and tickets load concurrently.
#[utoipa::path(
    get,
    path = "/api/v1/admin/overview",
    responses(
        (status = 200, description = "Dashboard aggregate", body = AdminOverview),
        (status = 401, description = "Admin login required", body = Error)
    ),
    tags = ["dashboard"],
    operation_id = "adminOverview"
)]
#[get("/admin/overview")]
pub async fn admin_overview(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<AdminOverview>> {
    session.require_admin()?;
    let (workers, requests) = try_join!(
        state.workers.fetch_workers(),
        state.support.fetch_support_requests()
    )?;
    Ok(web::Json(AdminOverview::summarise(workers, requests)))
}

/// The signed-in worker's record, ID card and tickets.
#[utoipa::path(
    get,
    path = "/api/v1/me",
    responses(
        (status = 200, description = "Worker dashboard", body = WorkerDashboard),
        (status = 401, description = "Worker login required", body = Error),
        (status = 404, description = "Worker record no longer exists", body = Error)
    ),
    tags = ["dashboard"],
    operation_id = "workerDashboard"
)]
#[get("/me")]
pub async fn worker_dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<WorkerDashboard>> {
    let worker_id = session.require_worker()?;
    let (worker, requests) = try_join!(
        state.workers.fetch_worker_by_id(&worker_id),
        state.support.support_requests_for(&worker_id)
    )?;
    let worker = worker.ok_or_else(|| Error::not_found("Could not find worker data"))?;
    Ok(web::Json(WorkerDashboard::new(worker, requests)))
}

/// Raise a ticket as the signed-in worker.
#[utoipa::path(
    post,
    path = "/api/v1/me/support-requests",
    request_body = NewSupportRequestBody,
    responses(
        (status = 201, description = "Ticket created", body = SupportRequestRecord),
        (status = 400, description = "Empty message", body = Error),
        (status = 401, description = "Worker login required", body = Error)
    ),
    tags = ["dashboard"],
    operation_id = "createSupportRequest"
)]
#[post("/me/support-requests")]
pub async fn create_support_request(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<NewSupportRequestBody>,
) -> ApiResult<HttpResponse> {
    let worker_id = session.require_worker()?;
    let message = parse_support_message(&payload.message)?;
    let request = state
        .support
        .create_support_request(&worker_id, message)
        .await?;
    Ok(HttpResponse::Created().json(request))
}
