//! Multi-step worker registration wizard.
//!
//! The wizard is a small state machine over three ordinal steps. Each step
//! names the form fields it needs before the wizard may advance; a rejected
//! transition leaves the state exactly as it was. The whole wizard serialises
//! so inbound adapters can keep it in a session between requests.

mod validation;

pub use validation::{FieldError, FieldErrors};

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Error, OtpCode, OtpPolicy, PhoneNumber, PhotoRef, WorkerRegistration};

/// Ordinal wizard step, serialised as `1`, `2` or `3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum RegistrationStep {
    /// Name, age, phone and state of origin.
    #[default]
    PersonalInfo,
    /// Skill and photo.
    PhotoAndSkill,
    /// OTP verification and submission.
    Verification,
}

impl RegistrationStep {
    /// One-based position.
    pub fn number(self) -> u8 {
        match self {
            Self::PersonalInfo => 1,
            Self::PhotoAndSkill => 2,
            Self::Verification => 3,
        }
    }

    /// Following step, if any.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::PersonalInfo => Some(Self::PhotoAndSkill),
            Self::PhotoAndSkill => Some(Self::Verification),
            Self::Verification => None,
        }
    }

    /// Preceding step; the first step is its own predecessor.
    pub fn prev(self) -> Self {
        match self {
            Self::PersonalInfo | Self::PhotoAndSkill => Self::PersonalInfo,
            Self::Verification => Self::PhotoAndSkill,
        }
    }

    /// Fields that must be present before leaving this step.
    pub fn required_fields(self) -> &'static [RegistrationField] {
        match self {
            Self::PersonalInfo => &[
                RegistrationField::Name,
                RegistrationField::Age,
                RegistrationField::Phone,
                RegistrationField::OriginState,
            ],
            Self::PhotoAndSkill => &[RegistrationField::Skill, RegistrationField::Photo],
            Self::Verification => &[],
        }
    }

    fn missing_fields_notice(self) -> &'static str {
        match self {
            Self::PhotoAndSkill => "Please select a skill and upload your photo",
            Self::PersonalInfo | Self::Verification => "Please fill in all required fields",
        }
    }
}

impl From<RegistrationStep> for u8 {
    fn from(value: RegistrationStep) -> Self {
        value.number()
    }
}

impl TryFrom<u8> for RegistrationStep {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::PersonalInfo),
            2 => Ok(Self::PhotoAndSkill),
            3 => Ok(Self::Verification),
            other => Err(format!("registration step must be 1, 2 or 3, got {other}")),
        }
    }
}

impl fmt::Display for RegistrationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Form field names as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum RegistrationField {
    Name,
    Age,
    Phone,
    OriginState,
    Skill,
    Photo,
    Aadhaar,
}

/// Raw form values exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationForm {
    pub name: String,
    pub age: String,
    pub phone: String,
    pub origin_state: String,
    pub skill: String,
    pub aadhaar: String,
}

/// Partial set of form values to merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationFieldsUpdate {
    pub name: Option<String>,
    pub age: Option<String>,
    pub phone: Option<String>,
    pub origin_state: Option<String>,
    pub skill: Option<String>,
    pub aadhaar: Option<String>,
}

/// Reasons a wizard action was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    /// Required fields for the current step are blank.
    #[error("{}", .step.missing_fields_notice())]
    MissingFields {
        step: RegistrationStep,
        fields: Vec<RegistrationField>,
    },
    /// `next` was called on the final step.
    #[error("Registration is already at the final step")]
    NoNextStep,
    /// OTP or submission attempted before reaching verification.
    #[error("Complete the earlier registration steps first")]
    NotAtVerification { step: RegistrationStep },
    /// Phone is blank or not a valid mobile number.
    #[error("Please enter a valid phone number")]
    InvalidPhone,
    /// Submission attempted before an OTP was sent.
    #[error("Please send and verify OTP first")]
    OtpNotSent,
    /// Submitted code was refused.
    #[error("{}", invalid_otp_notice(.demo_mode))]
    InvalidOtp { demo_mode: bool },
    /// One or more fields failed full validation on submission.
    #[error("Please correct the highlighted fields")]
    Invalid(FieldErrors),
}

fn invalid_otp_notice(demo_mode: &bool) -> &'static str {
    if *demo_mode {
        "Invalid OTP. For demo, use 123456 or any 6-digit number"
    } else {
        "Invalid OTP. For demo, use 123456"
    }
}

/// Registration wizard state.
///
/// ## Invariants
/// - `otp_sent` only becomes true through [`RegistrationWizard::mark_otp_sent`]
///   and is cleared whenever the phone number changes.
///
/// # Examples
/// ```
/// use migii::domain::{RegistrationFieldsUpdate, RegistrationStep, RegistrationWizard};
///
/// let mut wizard = RegistrationWizard::default();
/// assert!(wizard.next_step().is_err());
/// wizard.update_fields(RegistrationFieldsUpdate {
///     name: Some("Test User".into()),
///     age: Some("25".into()),
///     phone: Some("9123456789".into()),
///     origin_state: Some("Kerala".into()),
///     ..RegistrationFieldsUpdate::default()
/// });
/// assert_eq!(wizard.next_step(), Ok(RegistrationStep::PhotoAndSkill));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationWizard {
    #[schema(value_type = u8, minimum = 1, maximum = 3)]
    step: RegistrationStep,
    form: RegistrationForm,
    #[schema(value_type = Option<String>)]
    photo: Option<PhotoRef>,
    otp_sent: bool,
}

impl RegistrationWizard {
    pub fn step(&self) -> RegistrationStep {
        self.step
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    pub fn photo(&self) -> Option<&PhotoRef> {
        self.photo.as_ref()
    }

    pub fn otp_sent(&self) -> bool {
        self.otp_sent
    }

    /// Merge typed values into the form.
    pub fn update_fields(&mut self, update: RegistrationFieldsUpdate) {
        let RegistrationFieldsUpdate {
            name,
            age,
            phone,
            origin_state,
            skill,
            aadhaar,
        } = update;
        if let Some(phone) = phone.filter(|phone| *phone != self.form.phone) {
            self.form.phone = phone;
            self.otp_sent = false;
        }
        let form = &mut self.form;
        for (slot, value) in [
            (&mut form.name, name),
            (&mut form.age, age),
            (&mut form.origin_state, origin_state),
            (&mut form.skill, skill),
            (&mut form.aadhaar, aadhaar),
        ] {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }

    /// Record the reference of an uploaded photo.
    pub fn attach_photo(&mut self, photo: PhotoRef) {
        self.photo = Some(photo);
    }

    /// Advance one step if the current step's required fields are present.
    pub fn next_step(&mut self) -> Result<RegistrationStep, WizardError> {
        let next = self.step.next().ok_or(WizardError::NoNextStep)?;
        let missing = self.missing_fields(self.step);
        if !missing.is_empty() {
            return Err(WizardError::MissingFields {
                step: self.step,
                fields: missing,
            });
        }
        self.step = next;
        Ok(next)
    }

    /// Go back one step, keeping every entered value.
    pub fn prev_step(&mut self) -> RegistrationStep {
        self.step = self.step.prev();
        self.step
    }

    /// Check the wizard may send an OTP and return the target phone.
    pub fn otp_target(&self) -> Result<PhoneNumber, WizardError> {
        PhoneNumber::new(self.form.phone.as_str()).map_err(|_| WizardError::InvalidPhone)
    }

    /// Enable OTP entry.
    pub fn mark_otp_sent(&mut self) {
        self.otp_sent = true;
    }

    /// Validate the final step and produce the registration to store.
    ///
    /// The wizard is not modified; callers reset it once the worker is stored.
    pub fn prepare_submission(
        &self,
        otp: Option<&OtpCode>,
        policy: OtpPolicy,
    ) -> Result<WorkerRegistration, WizardError> {
        if self.step != RegistrationStep::Verification {
            return Err(WizardError::NotAtVerification { step: self.step });
        }
        if !self.otp_sent {
            return Err(WizardError::OtpNotSent);
        }
        let accepted = otp.is_some_and(|code| policy.accepts_registration_code(code));
        if !accepted {
            return Err(WizardError::InvalidOtp {
                demo_mode: policy.demo_mode(),
            });
        }
        validation::validate(&self.form, self.photo.as_ref()).map_err(WizardError::Invalid)
    }

    fn missing_fields(&self, step: RegistrationStep) -> Vec<RegistrationField> {
        step.required_fields()
            .iter()
            .copied()
            .filter(|field| !self.is_present(*field))
            .collect()
    }

    fn is_present(&self, field: RegistrationField) -> bool {
        let value = match field {
            RegistrationField::Name => &self.form.name,
            RegistrationField::Age => &self.form.age,
            RegistrationField::Phone => &self.form.phone,
            RegistrationField::OriginState => &self.form.origin_state,
            RegistrationField::Skill => &self.form.skill,
            RegistrationField::Aadhaar => &self.form.aadhaar,
            RegistrationField::Photo => return self.photo.is_some(),
        };
        !value.trim().is_empty()
    }
}

impl From<WizardError> for Error {
    fn from(value: WizardError) -> Self {
        let details = match &value {
            WizardError::MissingFields { step, fields } => json!({
                "code": "missing_fields",
                "step": step.number(),
                "fields": fields,
            }),
            WizardError::NoNextStep => json!({ "code": "no_next_step" }),
            WizardError::NotAtVerification { step } => json!({
                "code": "step_incomplete",
                "step": step.number(),
            }),
            WizardError::InvalidPhone => json!({ "field": "phone", "code": "invalid_phone" }),
            WizardError::OtpNotSent => json!({ "field": "otp", "code": "otp_not_sent" }),
            WizardError::InvalidOtp { .. } => json!({ "field": "otp", "code": "invalid_otp" }),
            WizardError::Invalid(errors) => json!({
                "code": "invalid_fields",
                "fields": errors,
            }),
        };
        Error::invalid_request(value.to_string()).with_details(details)
    }
}
