//! Shared request validation for inbound HTTP adapters.
//!
//! Each helper turns a raw request value into a domain type or an
//! `invalid_request` error whose details name the field and a stable code.

use serde_json::json;

use crate::domain::{
    AdminCredentials, AdminLoginValidationError, Error, OtpCode, PhoneNumber, PhotoRef,
    SupportMessage, SupportRequestId, WorkerId,
};

/// Validation error codes for request fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldCode {
    InvalidPhone,
    InvalidEmail,
    EmptyPassword,
    InvalidOtpFormat,
    EmptyPhoto,
    EmptyMessage,
    EmptyId,
}

impl FieldCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::InvalidPhone => "invalid_phone",
            Self::InvalidEmail => "invalid_email",
            Self::EmptyPassword => "empty_password",
            Self::InvalidOtpFormat => "invalid_otp_format",
            Self::EmptyPhoto => "empty_photo",
            Self::EmptyMessage => "empty_message",
            Self::EmptyId => "empty_id",
        }
    }
}

pub(crate) fn field_error(field: &str, code: FieldCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

pub(crate) fn parse_phone(raw: &str) -> Result<PhoneNumber, Error> {
    PhoneNumber::new(raw).map_err(|_| {
        field_error(
            "phone",
            FieldCode::InvalidPhone,
            "Please enter a valid phone number",
        )
    })
}

/// Login codes must be six characters before they reach the service.
pub(crate) fn parse_login_otp(raw: &str) -> Result<OtpCode, Error> {
    OtpCode::new(raw)
        .ok()
        .filter(|otp| otp.is_six_digits())
        .ok_or_else(|| {
            field_error(
                "otp",
                FieldCode::InvalidOtpFormat,
                "Please enter a valid 6-digit OTP",
            )
        })
}

/// Optional registration code; blank input counts as absent.
pub(crate) fn parse_optional_otp(raw: Option<&str>) -> Option<OtpCode> {
    raw.and_then(|raw| OtpCode::new(raw).ok())
}

pub(crate) fn parse_admin_credentials(
    email: &str,
    password: &str,
) -> Result<AdminCredentials, Error> {
    AdminCredentials::try_from_parts(email, password).map_err(|error| match error {
        AdminLoginValidationError::InvalidEmail => {
            field_error("email", FieldCode::InvalidEmail, error.to_string())
        }
        AdminLoginValidationError::EmptyPassword => {
            field_error("password", FieldCode::EmptyPassword, error.to_string())
        }
        other => Error::invalid_request(other.to_string()),
    })
}

pub(crate) fn parse_photo(raw: &str) -> Result<PhotoRef, Error> {
    PhotoRef::new(raw)
        .map_err(|_| field_error("photo", FieldCode::EmptyPhoto, "Please upload your photo"))
}

pub(crate) fn parse_support_message(raw: &str) -> Result<SupportMessage, Error> {
    SupportMessage::new(raw)
        .map_err(|error| field_error("message", FieldCode::EmptyMessage, error.to_string()))
}

pub(crate) fn parse_worker_id(raw: &str) -> Result<WorkerId, Error> {
    WorkerId::new(raw)
        .map_err(|error| field_error("id", FieldCode::EmptyId, error.to_string()))
}

pub(crate) fn parse_support_request_id(raw: &str) -> Result<SupportRequestId, Error> {
    SupportRequestId::new(raw)
        .map_err(|error| field_error("id", FieldCode::EmptyId, error.to_string()))
}
