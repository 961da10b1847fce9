//! Public identity verification for the value a worker's QR code encodes.
//!
//! ```text
//! GET /api/v1/verify/TN-MIG-20230401-54321
//! ```

use actix_web::{get, web};

use crate::domain::{Error, IdentityCard, UniqueId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Public identity card for a unique ID.
///
/// Malformed IDs are reported as unknown so the endpoint reveals nothing about
/// the ID format.
#[utoipa::path(
    get,
    path = "/api/v1/verify/{uniqueId}",
    params(("uniqueId" = String, Path, description = "Worker unique ID")),
    responses(
        (status = 200, description = "Identity card", body = IdentityCard),
        (status = 404, description = "No worker carries this ID", body = Error)
    ),
    tags = ["verify"],
    operation_id = "verifyWorker",
    security([])
)]
#[get("/verify/{unique_id}")]
pub async fn verify_worker(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<IdentityCard>> {
    let unknown = || Error::not_found("No registered worker carries this ID");
    let unique_id = UniqueId::parse(path.into_inner()).map_err(|_| unknown())?;
    let worker = state
        .workers
        .find_by_unique_id(&unique_id)
        .await?
        .ok_or_else(unknown)?;
    Ok(web::Json(IdentityCard::from(&worker)))
}
