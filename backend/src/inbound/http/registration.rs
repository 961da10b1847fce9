//! Registration wizard handlers.
//!
//! The wizard lives in the session cookie, so each visitor owns exactly one
//! in-progress registration. Step transitions never touch the Mock API; OTP
//! dispatch and submission go through [`RegistrationFlow`].
//!
//! ```text
//! PUT  /api/v1/registration/fields {"name":"Test User","age":"25"}
//! POST /api/v1/registration/next
//! POST /api/v1/registration/submit {"otp":"123456"}
//! ```
//!
//! [`RegistrationFlow`]: crate::domain::ports::RegistrationFlow

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{OtpDispatch, RegistrationOutcome};
use crate::domain::{Error, RegistrationFieldsUpdate, RegistrationWizard, Worker};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::OtpNotice;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_optional_otp, parse_photo};

/// Photo reference produced by the client-side upload preview.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRequest {
    #[schema(example = "blob:https://migii.example/4f1c")]
    pub photo: String,
}

/// Final submission body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    #[serde(default)]
    #[schema(example = "123456")]
    pub otp: Option<String>,
}

/// Result of a successful submission.
#[derive(Debug, Serialize, ToSchema)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum SubmitResponse {
    /// The worker was stored; `worker.uniqueId` is their new ID.
    Registered { worker: Worker },
    /// Storage failed in demo mode; the visitor still sees success.
    AcceptedInDemoMode { message: String },
}

const DEMO_ACCEPTANCE_NOTICE: &str = "Registration received (demo mode)";

fn saved(
    session: &SessionContext,
    wizard: RegistrationWizard,
) -> ApiResult<web::Json<RegistrationWizard>> {
    session.save_wizard(&wizard)?;
    Ok(web::Json(wizard))
}

/// Current wizard state; a fresh wizard starts at step 1.
#[utoipa::path(
    get,
    path = "/api/v1/registration",
    responses((status = 200, description = "Wizard state", body = RegistrationWizard)),
    tags = ["registration"],
    operation_id = "getRegistration",
    security([])
)]
#[get("/registration")]
pub async fn get_registration(session: SessionContext) -> web::Json<RegistrationWizard> {
    web::Json(session.wizard())
}

/// Discard the wizard.
#[utoipa::path(
    delete,
    path = "/api/v1/registration",
    responses((status = 204, description = "Wizard reset")),
    tags = ["registration"],
    operation_id = "resetRegistration",
    security([])
)]
#[delete("/registration")]
pub async fn reset_registration(session: SessionContext) -> HttpResponse {
    session.clear_wizard();
    HttpResponse::NoContent().finish()
}

/// Merge raw form values; nothing is validated until a step transition.
#[utoipa::path(
    put,
    path = "/api/v1/registration/fields",
    request_body = RegistrationFieldsUpdate,
    responses(
        (status = 200, description = "Updated wizard", body = RegistrationWizard),
        (status = 400, description = "Malformed body", body = Error)
    ),
    tags = ["registration"],
    operation_id = "updateRegistrationFields",
    security([])
)]
#[put("/registration/fields")]
pub async fn update_fields(
    session: SessionContext,
    payload: web::Json<RegistrationFieldsUpdate>,
) -> ApiResult<web::Json<RegistrationWizard>> {
    let mut wizard = session.wizard();
    wizard.update_fields(payload.into_inner());
    saved(&session, wizard)
}

/// Record the photo reference for step 2.
#[utoipa::path(
    post,
    path = "/api/v1/registration/photo",
    request_body = PhotoRequest,
    responses(
        (status = 200, description = "Updated wizard", body = RegistrationWizard),
        (status = 400, description = "Empty photo reference", body = Error)
    ),
    tags = ["registration"],
    operation_id = "attachRegistrationPhoto",
    security([])
)]
#[post("/registration/photo")]
pub async fn attach_photo(
    session: SessionContext,
    payload: web::Json<PhotoRequest>,
) -> ApiResult<web::Json<RegistrationWizard>> {
    let photo = parse_photo(&payload.photo)?;
    let mut wizard = session.wizard();
    wizard.attach_photo(photo);
    saved(&session, wizard)
}

/// Advance when the current step's required fields are present.
#[utoipa::path(
    post,
    path = "/api/v1/registration/next",
    responses(
        (status = 200, description = "Advanced wizard", body = RegistrationWizard),
        (status = 400, description = "Required fields missing", body = Error)
    ),
    tags = ["registration"],
    operation_id = "nextRegistrationStep",
    security([])
)]
#[post("/registration/next")]
pub async fn next_step(session: SessionContext) -> ApiResult<web::Json<RegistrationWizard>> {
    let mut wizard = session.wizard();
    wizard.next_step()?;
    saved(&session, wizard)
}

/// Go back one step, keeping every entered value.
#[utoipa::path(
    post,
    path = "/api/v1/registration/prev",
    responses((status = 200, description = "Wizard one step back", body = RegistrationWizard)),
    tags = ["registration"],
    operation_id = "prevRegistrationStep",
    security([])
)]
#[post("/registration/prev")]
pub async fn prev_step(session: SessionContext) -> ApiResult<web::Json<RegistrationWizard>> {
    let mut wizard = session.wizard();
    wizard.prev_step();
    saved(&session, wizard)
}

/// Send the verification code to the phone on the form.
#[utoipa::path(
    post,
    path = "/api/v1/registration/otp",
    responses(
        (status = 200, description = "Code sent", body = OtpNotice),
        (status = 400, description = "Invalid phone number", body = Error),
        (status = 503, description = "SMS gateway unavailable", body = Error)
    ),
    tags = ["registration"],
    operation_id = "sendRegistrationOtp",
    security([])
)]
#[post("/registration/otp")]
pub async fn send_registration_otp(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<OtpNotice>> {
    let mut wizard = session.wizard();
    let dispatch = state.registration.send_otp(&mut wizard).await?;
    session.save_wizard(&wizard)?;
    Ok(web::Json(OtpNotice {
        message: dispatch.notice().to_owned(),
        demo_mode: dispatch == OtpDispatch::SentInDemoMode,
    }))
}

/// Verify the code and create the worker.
///
/// Either success outcome ends the wizard.
#[utoipa::path(
    post,
    path = "/api/v1/registration/submit",
    request_body = SubmitRequest,
    responses(
        (status = 201, description = "Worker registered", body = SubmitResponse),
        (status = 202, description = "Accepted in demo mode", body = SubmitResponse),
        (status = 400, description = "Wizard incomplete or code refused", body = Error),
        (status = 503, description = "Worker store unavailable", body = Error)
    ),
    tags = ["registration"],
    operation_id = "submitRegistration",
    security([])
)]
#[post("/registration/submit")]
pub async fn submit_registration(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: Option<web::Json<SubmitRequest>>,
) -> ApiResult<HttpResponse> {
    let request = payload.map(web::Json::into_inner).unwrap_or_default();
    let otp = parse_optional_otp(request.otp.as_deref());
    let wizard = session.wizard();
    let outcome = state.registration.submit(&wizard, otp).await?;
    session.clear_wizard();
    Ok(match outcome {
        RegistrationOutcome::Registered { worker } => {
            HttpResponse::Created().json(SubmitResponse::Registered { worker })
        }
        RegistrationOutcome::AcceptedInDemoMode => {
            HttpResponse::Accepted().json(SubmitResponse::AcceptedInDemoMode {
                message: DEMO_ACCEPTANCE_NOTICE.to_owned(),
            })
        }
    })
}

#[cfg(test)]
#[path = "registration_tests.rs"]
mod tests;
