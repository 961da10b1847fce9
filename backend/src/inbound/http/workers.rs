//! Admin worker management handlers.
//!
//! ```text
//! GET    /api/v1/workers?q=carpentry
//! GET    /api/v1/workers/1
//! PATCH  /api/v1/workers/1 {"status":"inactive"}
//! DELETE /api/v1/workers/1
//! ```

use std::str::FromStr;

use actix_web::{HttpResponse, delete, get, patch, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, Worker, WorkerPatch, WorkerSearchQuery, WorkerStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_worker_id;

fn worker_not_found() -> Error {
    Error::not_found("Worker not found")
}

/// Optional free-text filter.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct WorkerListQuery {
    /// Matched case-insensitively against name, skill, origin state and unique ID.
    pub q: Option<String>,
}

/// Status change body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkerStatusUpdate {
    #[schema(example = "inactive")]
    pub status: String,
}

/// List workers, or search them when `q` is non-blank.
#[utoipa::path(
    get,
    path = "/api/v1/workers",
    params(WorkerListQuery),
    responses(
        (status = 200, description = "Workers", body = [Worker]),
        (status = 401, description = "Admin login required", body = Error)
    ),
    tags = ["workers"],
    operation_id = "listWorkers"
)]
#[get("/workers")]
pub async fn list_workers(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<WorkerListQuery>,
) -> ApiResult<web::Json<Vec<Worker>>> {
    session.require_admin()?;
    let search = WorkerSearchQuery::new(query.q.as_deref().unwrap_or_default());
    let workers = if search.is_blank() {
        state.workers.fetch_workers().await?
    } else {
        state.workers.search_workers(&search).await?
    };
    Ok(web::Json(workers))
}

/// Full worker record.
#[utoipa::path(
    get,
    path = "/api/v1/workers/{id}",
    params(("id" = String, Path, description = "Worker id")),
    responses(
        (status = 200, description = "Worker", body = Worker),
        (status = 401, description = "Admin login required", body = Error),
        (status = 404, description = "Worker not found", body = Error)
    ),
    tags = ["workers"],
    operation_id = "getWorker"
)]
#[get("/workers/{id}")]
pub async fn get_worker(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Worker>> {
    session.require_admin()?;
    let id = parse_worker_id(&path)?;
    let worker = state
        .workers
        .fetch_worker_by_id(&id)
        .await?
        .ok_or_else(worker_not_found)?;
    Ok(web::Json(worker))
}

/// Change a worker's status.
#[utoipa::path(
    patch,
    path = "/api/v1/workers/{id}",
    params(("id" = String, Path, description = "Worker id")),
    request_body = WorkerStatusUpdate,
    responses(
        (status = 200, description = "Updated worker", body = Worker),
        (status = 400, description = "Unknown status", body = Error),
        (status = 401, description = "Admin login required", body = Error),
        (status = 403, description = "Role may not modify workers", body = Error),
        (status = 404, description = "Worker not found", body = Error)
    ),
    tags = ["workers"],
    operation_id = "updateWorkerStatus"
)]
#[patch("/workers/{id}")]
pub async fn update_worker(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<WorkerStatusUpdate>,
) -> ApiResult<web::Json<Worker>> {
    session.require_admin_writer()?;
    let id = parse_worker_id(&path)?;
    let status = WorkerStatus::from_str(&payload.status).map_err(|error| {
        Error::invalid_request(error.to_string())
            .with_details(json!({ "field": "status", "code": "unknown_status" }))
    })?;
    let worker = state
        .workers
        .update_worker(&id, WorkerPatch::status(status))
        .await?
        .ok_or_else(worker_not_found)?;
    Ok(web::Json(worker))
}

/// Remove a worker record.
#[utoipa::path(
    delete,
    path = "/api/v1/workers/{id}",
    params(("id" = String, Path, description = "Worker id")),
    responses(
        (status = 204, description = "Worker removed"),
        (status = 401, description = "Admin login required", body = Error),
        (status = 403, description = "Role may not modify workers", body = Error),
        (status = 404, description = "Worker not found", body = Error)
    ),
    tags = ["workers"],
    operation_id = "deleteWorker"
)]
#[delete("/workers/{id}")]
pub async fn delete_worker(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    session.require_admin_writer()?;
    let id = parse_worker_id(&path)?;
    if state.workers.delete_worker(&id).await? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(worker_not_found())
    }
}
