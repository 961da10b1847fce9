//! Admin support desk handlers.
//!
//! ```text
//! GET   /api/v1/support-requests
//! PATCH /api/v1/support-requests/1 {"status":"resolved"}
//! POST  /api/v1/support-requests/1/resolve
//! ```

use std::str::FromStr;

use actix_web::{get, patch, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    Error, SupportRequest, SupportRequestPatch, SupportRequestRecord, SupportStatus,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_support_message, parse_support_request_id};

fn request_not_found() -> Error {
    Error::not_found("Support request not found")
}

/// Fields an administrator may merge into a ticket.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupportRequestUpdate {
    pub message: Option<String>,
    #[schema(example = "resolved")]
    pub status: Option<String>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl SupportRequestUpdate {
    fn into_patch(self) -> Result<SupportRequestPatch, Error> {
        let message = self
            .message
            .as_deref()
            .map(parse_support_message)
            .transpose()?;
        let status = self
            .status
            .as_deref()
            .map(SupportStatus::from_str)
            .transpose()
            .map_err(|error| {
                Error::invalid_request(error.to_string())
                    .with_details(json!({ "field": "status", "code": "unknown_status" }))
            })?;
        Ok(SupportRequestPatch {
            message,
            status,
            resolved_at: self.resolved_at,
        })
    }
}

/// Every ticket, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/support-requests",
    responses(
        (status = 200, description = "Support requests", body = [SupportRequestRecord]),
        (status = 401, description = "Admin login required", body = Error)
    ),
    tags = ["support"],
    operation_id = "listSupportRequests"
)]
#[get("/support-requests")]
pub async fn list_support_requests(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<SupportRequest>>> {
    session.require_admin()?;
    Ok(web::Json(state.support.fetch_support_requests().await?))
}

/// Merge fields into a ticket.
///
/// Setting `resolvedAt` on a ticket that stays pending is rejected.
#[utoipa::path(
    patch,
    path = "/api/v1/support-requests/{id}",
    params(("id" = String, Path, description = "Support request id")),
    request_body = SupportRequestUpdate,
    responses(
        (status = 200, description = "Updated request", body = SupportRequestRecord),
        (status = 400, description = "Invalid update", body = Error),
        (status = 401, description = "Admin login required", body = Error),
        (status = 403, description = "Role may not modify tickets", body = Error),
        (status = 404, description = "Support request not found", body = Error)
    ),
    tags = ["support"],
    operation_id = "updateSupportRequest"
)]
#[patch("/support-requests/{id}")]
pub async fn update_support_request(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<SupportRequestUpdate>,
) -> ApiResult<web::Json<SupportRequest>> {
    session.require_admin_writer()?;
    let id = parse_support_request_id(&path)?;
    let patch = payload.into_inner().into_patch()?;
    let request = state
        .support
        .update_support_request(&id, patch)
        .await?
        .ok_or_else(request_not_found)?;
    Ok(web::Json(request))
}

/// Mark a ticket resolved now.
#[utoipa::path(
    post,
    path = "/api/v1/support-requests/{id}/resolve",
    params(("id" = String, Path, description = "Support request id")),
    responses(
        (status = 200, description = "Resolved request", body = SupportRequestRecord),
        (status = 401, description = "Admin login required", body = Error),
        (status = 403, description = "Role may not modify tickets", body = Error),
        (status = 404, description = "Support request not found", body = Error)
    ),
    tags = ["support"],
    operation_id = "resolveSupportRequest"
)]
#[post("/support-requests/{id}/resolve")]
pub async fn resolve_support_request(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<SupportRequest>> {
    session.require_admin_writer()?;
    let id = parse_support_request_id(&path)?;
    let request = state
        .support
        .resolve_support_request(&id)
        .await?
        .ok_or_else(request_not_found)?;
    Ok(web::Json(request))
}
