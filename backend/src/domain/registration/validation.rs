//! Full-form validation run on submission.

use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;

use super::{RegistrationField, RegistrationForm};
use crate::domain::{
    AadhaarNumber, Age, OriginState, PhoneNumber, PhotoRef, Skill, WorkerName,
    WorkerRegistration,
};

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub field: RegistrationField,
    pub message: String,
}

/// Every field that failed validation, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    fn push(&mut self, field: RegistrationField, message: impl fmt::Display) {
        self.0.push(FieldError {
            field,
            message: message.to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Fields that failed, without messages.
    pub fn fields(&self) -> Vec<RegistrationField> {
        self.0.iter().map(|error| error.field).collect()
    }
}

fn required<T, E: fmt::Display>(
    errors: &mut FieldErrors,
    field: RegistrationField,
    blank_message: &str,
    raw: &str,
    parse: impl FnOnce(&str) -> Result<T, E>,
) -> Option<T> {
    if raw.trim().is_empty() {
        errors.push(field, blank_message);
        return None;
    }
    match parse(raw) {
        Ok(value) => Some(value),
        Err(err) => {
            errors.push(field, err);
            None
        }
    }
}

/// Validate the form and photo, reporting every failing field.
pub(super) fn validate(
    form: &RegistrationForm,
    photo: Option<&PhotoRef>,
) -> Result<WorkerRegistration, FieldErrors> {
    let mut errors = FieldErrors::default();

    let name = required(
        &mut errors,
        RegistrationField::Name,
        "Name must be at least 2 characters",
        &form.name,
        |raw| WorkerName::new(raw),
    );
    let age = required(
        &mut errors,
        RegistrationField::Age,
        "Age is required",
        &form.age,
        str::parse::<Age>,
    );
    let phone = required(
        &mut errors,
        RegistrationField::Phone,
        "Phone number must be at least 10 digits",
        &form.phone,
        |raw| PhoneNumber::new(raw),
    );
    let origin_state = required(
        &mut errors,
        RegistrationField::OriginState,
        "State of origin is required",
        &form.origin_state,
        str::parse::<OriginState>,
    );
    let skill = required(
        &mut errors,
        RegistrationField::Skill,
        "Skill is required",
        &form.skill,
        str::parse::<Skill>,
    );
    let photo = photo.cloned();
    if photo.is_none() {
        errors.push(RegistrationField::Photo, "Please upload your photo");
    }
    let aadhaar = if form.aadhaar.trim().is_empty() {
        None
    } else {
        match AadhaarNumber::new(form.aadhaar.as_str()) {
            Ok(aadhaar) => Some(aadhaar),
            Err(err) => {
                errors.push(RegistrationField::Aadhaar, err);
                None
            }
        }
    };

    match (name, age, phone, origin_state, skill, photo) {
        (Some(name), Some(age), Some(phone), Some(origin_state), Some(skill), Some(photo))
            if errors.is_empty() =>
        {
            Ok(WorkerRegistration {
                name,
                age,
                phone,
                origin_state,
                skill,
                photo,
                aadhaar,
            })
        }
        _ => Err(errors),
    }
}
