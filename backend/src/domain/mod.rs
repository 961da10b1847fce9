//! Domain primitives, aggregates and Mock API services.
//!
//! Purpose: define strongly typed worker, support request and admin entities,
//! the registration wizard state machine, and the services that implement the
//! driving ports over the driven ports in [`ports`]. Keep types immutable where
//! possible and document invariants and serialisation contracts (serde) in
//! each type's Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable identifiers.
//! - Worker and its value types; UniqueId issuance.
//! - SupportRequest, AdminUser, AdminCredentials.
//! - RegistrationWizard and its step/field types.
//! - WorkerService, SupportDeskService, OtpLoginService, AdminAuthService,
//!   RegistrationService.

pub mod admin;
mod auth_service;
pub mod dashboard;
pub mod error;
pub mod form_options;
pub mod otp;
pub mod ports;
pub mod registration;
mod registration_service;
pub mod support_request;
mod support_service;
pub mod trace_id;
pub mod unique_id;
pub mod worker;
mod worker_service;

pub use self::admin::{
    AdminCredentials, AdminId, AdminLoginValidationError, AdminRole,
    AdminUser,
};
pub use self::auth_service::{AdminAuthService, OtpLoginService};
pub use self::dashboard::{
    AdminOverview, DashboardTotals, IdentityCard, MonthlyRegistrations, WorkerDashboard,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::form_options::{OriginState, Skill, UnknownOptionError};
pub use self::otp::{DEMO_OTP, EmptyOtp, OtpCode, OtpPolicy};
pub use self::registration::{
    FieldError, FieldErrors, RegistrationField, RegistrationFieldsUpdate, RegistrationForm,
    RegistrationStep, RegistrationWizard, WizardError,
};
pub use self::registration_service::RegistrationService;
pub use self::support_request::{
    NewSupportRequest, SupportMessage, SupportRequest, SupportRequestId, SupportRequestPatch,
    SupportRequestRecord, SupportRequestValidationError, SupportStatus,
};
pub use self::support_service::SupportDeskService;
pub use self::trace_id::TraceId;
pub use self::unique_id::{FixedSuffix, InvalidUniqueId, RandomSuffix, UniqueId, UniqueIdSuffix};
pub use self::worker::{
    AadhaarNumber, Age, PhoneNumber, PhotoRef, Worker, WorkerDraft, WorkerId, WorkerName,
    WorkerPatch, WorkerRegistration, WorkerSearchQuery, WorkerStatus, WorkerValidationError,
};
pub use self::worker_service::{MockApiRuntime, WorkerService};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use migii::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
