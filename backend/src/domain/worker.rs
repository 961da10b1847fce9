//! Worker identity and profile model.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{OriginState, Skill, UniqueId};

/// Minimum accepted worker age.
pub const AGE_MIN: u8 = 18;
/// Maximum accepted worker age.
pub const AGE_MAX: u8 = 80;
/// Minimum length of a worker name once trimmed.
pub const NAME_MIN: usize = 2;
/// Maximum length of a worker name once trimmed.
pub const NAME_MAX: usize = 100;

/// Validation errors raised by worker value constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkerValidationError {
    /// Identifier was blank.
    #[error("worker id must not be empty")]
    EmptyId,
    /// Name shorter than [`NAME_MIN`] characters.
    #[error("Name must be at least {min} characters")]
    NameTooShort { min: usize },
    /// Name longer than [`NAME_MAX`] characters.
    #[error("Name must be at most {max} characters")]
    NameTooLong { max: usize },
    /// Age missing, not numeric, or outside the accepted range.
    #[error("Age must be between {min} and {max}")]
    AgeOutOfRange { min: u8, max: u8 },
    /// Phone is not a ten digit Indian mobile number.
    #[error("Enter a valid Indian mobile number")]
    InvalidPhone,
    /// Photo reference was blank.
    #[error("photo reference must not be empty")]
    EmptyPhoto,
    /// Aadhaar is not formatted `XXXX-XXXX-XXXX`.
    #[error("Aadhaar format: XXXX-XXXX-XXXX")]
    InvalidAadhaar,
    /// Status label is not one of `active`, `inactive`, `pending`.
    #[error("unknown worker status: {0}")]
    UnknownStatus(String),
}

/// Opaque local key assigned by the worker store.
///
/// Stores hand out sequential decimal keys; the type itself only requires a
/// non-blank value so orphaned references from support requests still parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WorkerId(String);

impl WorkerId {
    /// Validate and construct a [`WorkerId`].
    pub fn new(id: impl Into<String>) -> Result<Self, WorkerValidationError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(WorkerValidationError::EmptyId);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Key for the `sequence`-th stored worker.
    pub fn from_sequence(sequence: u64) -> Self {
        Self(sequence.to_string())
    }
}

impl AsRef<str> for WorkerId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<WorkerId> for String {
    fn from(value: WorkerId) -> Self {
        value.0
    }
}

impl TryFrom<String> for WorkerId {
    type Error = WorkerValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Worker's full name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WorkerName(String);

impl WorkerName {
    /// Validate and construct a [`WorkerName`]; surrounding whitespace is dropped.
    pub fn new(name: impl Into<String>) -> Result<Self, WorkerValidationError> {
        let name = name.into();
        let trimmed = name.trim();
        let length = trimmed.chars().count();
        if length < NAME_MIN {
            return Err(WorkerValidationError::NameTooShort { min: NAME_MIN });
        }
        if length > NAME_MAX {
            return Err(WorkerValidationError::NameTooLong { max: NAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for WorkerName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for WorkerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<WorkerName> for String {
    fn from(value: WorkerName) -> Self {
        value.0
    }
}

impl TryFrom<String> for WorkerName {
    type Error = WorkerValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Age in whole years, between [`AGE_MIN`] and [`AGE_MAX`] inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Age(u8);

impl Age {
    /// Validate and construct an [`Age`].
    pub fn new(years: u8) -> Result<Self, WorkerValidationError> {
        if (AGE_MIN..=AGE_MAX).contains(&years) {
            Ok(Self(years))
        } else {
            Err(WorkerValidationError::AgeOutOfRange {
                min: AGE_MIN,
                max: AGE_MAX,
            })
        }
    }

    /// Whole years.
    pub fn years(self) -> u8 {
        self.0
    }
}

impl FromStr for Age {
    type Err = WorkerValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let years = raw
            .trim()
            .parse::<u8>()
            .map_err(|_| WorkerValidationError::AgeOutOfRange {
                min: AGE_MIN,
                max: AGE_MAX,
            })?;
        Self::new(years)
    }
}

impl From<Age> for u8 {
    fn from(value: Age) -> Self {
        value.0
    }
}

impl TryFrom<u8> for Age {
    type Error = WorkerValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

static PHONE_RE: OnceLock<Regex> = OnceLock::new();

fn phone_regex() -> &'static Regex {
    PHONE_RE.get_or_init(|| {
        Regex::new(r"^[6-9]\d{9}$")
            .unwrap_or_else(|error| panic!("phone regex failed to compile: {error}"))
    })
}

/// Ten digit Indian mobile number starting with 6, 7, 8 or 9.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Validate and construct a [`PhoneNumber`].
    ///
    /// # Examples
    /// ```
    /// use migii::domain::PhoneNumber;
    ///
    /// assert!(PhoneNumber::new("9123456789").is_ok());
    /// assert!(PhoneNumber::new("5123456789").is_err());
    /// ```
    pub fn new(phone: impl Into<String>) -> Result<Self, WorkerValidationError> {
        let phone = phone.into();
        let trimmed = phone.trim();
        if phone_regex().is_match(trimmed) {
            Ok(Self(trimmed.to_owned()))
        } else {
            Err(WorkerValidationError::InvalidPhone)
        }
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = WorkerValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Reference to an uploaded photo: a local blob handle or a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhotoRef(String);

impl PhotoRef {
    /// Validate and construct a [`PhotoRef`].
    pub fn new(reference: impl Into<String>) -> Result<Self, WorkerValidationError> {
        let reference = reference.into();
        let trimmed = reference.trim();
        if trimmed.is_empty() {
            return Err(WorkerValidationError::EmptyPhoto);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for PhotoRef {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<PhotoRef> for String {
    fn from(value: PhotoRef) -> Self {
        value.0
    }
}

impl TryFrom<String> for PhotoRef {
    type Error = WorkerValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

static AADHAAR_RE: OnceLock<Regex> = OnceLock::new();
static STORED_AADHAAR_RE: OnceLock<Regex> = OnceLock::new();

fn aadhaar_regex() -> &'static Regex {
    AADHAAR_RE.get_or_init(|| {
        Regex::new(r"^\d{4}-\d{4}-\d{4}$")
            .unwrap_or_else(|error| panic!("aadhaar regex failed to compile: {error}"))
    })
}

fn stored_aadhaar_regex() -> &'static Regex {
    STORED_AADHAAR_RE.get_or_init(|| {
        // Stored records may mask the leading groups.
        Regex::new(r"^(\d{4}|XXXX)-(\d{4}|XXXX)-\d{4}$")
            .unwrap_or_else(|error| panic!("aadhaar regex failed to compile: {error}"))
    })
}

/// Aadhaar number in `XXXX-XXXX-XXXX` form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AadhaarNumber(String);

impl AadhaarNumber {
    /// Validate a freshly entered, fully numeric Aadhaar number.
    pub fn new(value: impl Into<String>) -> Result<Self, WorkerValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if aadhaar_regex().is_match(trimmed) {
            Ok(Self(trimmed.to_owned()))
        } else {
            Err(WorkerValidationError::InvalidAadhaar)
        }
    }

    /// Validate a stored Aadhaar number whose leading groups may be masked.
    pub fn from_stored(value: impl Into<String>) -> Result<Self, WorkerValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if stored_aadhaar_regex().is_match(trimmed) {
            Ok(Self(trimmed.to_owned()))
        } else {
            Err(WorkerValidationError::InvalidAadhaar)
        }
    }
}

impl AsRef<str> for AadhaarNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<AadhaarNumber> for String {
    fn from(value: AadhaarNumber) -> Self {
        value.0
    }
}

impl TryFrom<String> for AadhaarNumber {
    type Error = WorkerValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_stored(value)
    }
}

/// Lifecycle status of a worker record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum WorkerStatus {
    /// Registered and verified.
    Active,
    /// Deactivated by an administrator.
    Inactive,
    /// Awaiting administrator review.
    Pending,
}

impl WorkerStatus {
    /// Wire label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Pending => "pending",
        }
    }
}

impl FromStr for WorkerStatus {
    type Err = WorkerValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "pending" => Ok(Self::Pending),
            _ => Err(WorkerValidationError::UnknownStatus(raw.to_owned())),
        }
    }
}

/// Validated registration data; everything a worker supplies themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerRegistration {
    pub name: WorkerName,
    pub age: Age,
    pub phone: PhoneNumber,
    pub origin_state: OriginState,
    pub skill: Skill,
    pub photo: PhotoRef,
    pub aadhaar: Option<AadhaarNumber>,
}

/// A registration plus the values the backend derives at creation time.
///
/// Stores turn a draft into a [`Worker`] by assigning the next [`WorkerId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerDraft {
    pub registration: WorkerRegistration,
    pub unique_id: UniqueId,
    pub status: WorkerStatus,
    pub created_at: DateTime<Utc>,
}

impl WorkerDraft {
    /// Materialise the draft under the store-assigned identifier.
    pub fn into_worker(self, id: WorkerId) -> Worker {
        let WorkerDraft {
            registration,
            unique_id,
            status,
            created_at,
        } = self;
        let WorkerRegistration {
            name,
            age,
            phone,
            origin_state,
            skill,
            photo,
            aadhaar,
        } = registration;
        Worker {
            id,
            name,
            age,
            phone,
            origin_state,
            skill,
            photo,
            aadhaar,
            unique_id,
            status,
            created_at,
        }
    }
}

/// Partial update merged into an existing worker.
///
/// Identity fields (`id`, `uniqueId`, `createdAt`) have no counterpart here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerPatch {
    pub name: Option<WorkerName>,
    pub age: Option<Age>,
    pub phone: Option<PhoneNumber>,
    pub origin_state: Option<OriginState>,
    pub skill: Option<Skill>,
    pub photo: Option<PhotoRef>,
    pub aadhaar: Option<AadhaarNumber>,
    pub status: Option<WorkerStatus>,
}

impl WorkerPatch {
    /// Patch that only changes the status.
    pub fn status(status: WorkerStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Case-insensitive free-text worker search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerSearchQuery(String);

impl WorkerSearchQuery {
    /// Normalise raw input; surrounding whitespace is ignored.
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_lowercase())
    }

    /// Whether the query should reset to the full list.
    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }

    /// Lower-cased needle.
    pub fn needle(&self) -> &str {
        self.0.as_str()
    }
}

/// Registered worker.
///
/// ## Invariants
/// - `unique_id` is assigned once at creation and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    #[schema(value_type = String, example = "1")]
    id: WorkerId,
    #[schema(value_type = String, example = "Rajesh Kumar")]
    name: WorkerName,
    #[schema(value_type = u8, example = 32)]
    age: Age,
    #[schema(value_type = String, example = "9876543210")]
    phone: PhoneNumber,
    #[schema(value_type = String, example = "Tamil Nadu")]
    origin_state: OriginState,
    #[schema(value_type = String, example = "Carpentry")]
    skill: Skill,
    #[schema(value_type = String, example = "https://randomuser.me/api/portraits/men/1.jpg")]
    photo: PhotoRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "XXXX-XXXX-1234")]
    aadhaar: Option<AadhaarNumber>,
    #[schema(value_type = String, example = "TN-MIG-20230401-54321")]
    unique_id: UniqueId,
    status: WorkerStatus,
    created_at: DateTime<Utc>,
}

impl Worker {
    /// Stable store key.
    pub fn id(&self) -> &WorkerId {
        &self.id
    }

    /// Full name.
    pub fn name(&self) -> &WorkerName {
        &self.name
    }

    /// Age in years.
    pub fn age(&self) -> Age {
        self.age
    }

    /// Mobile number used for OTP login.
    pub fn phone(&self) -> &PhoneNumber {
        &self.phone
    }

    /// State of origin.
    pub fn origin_state(&self) -> OriginState {
        self.origin_state
    }

    /// Registered trade.
    pub fn skill(&self) -> Skill {
        self.skill
    }

    /// Photo reference.
    pub fn photo(&self) -> &PhotoRef {
        &self.photo
    }

    /// Optional Aadhaar number.
    pub fn aadhaar(&self) -> Option<&AadhaarNumber> {
        self.aadhaar.as_ref()
    }

    /// Derived unique identifier.
    pub fn unique_id(&self) -> &UniqueId {
        &self.unique_id
    }

    /// Lifecycle status.
    pub fn status(&self) -> WorkerStatus {
        self.status
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Merge a patch into this record.
    pub fn apply(&mut self, patch: WorkerPatch) {
        let WorkerPatch {
            name,
            age,
            phone,
            origin_state,
            skill,
            photo,
            aadhaar,
            status,
        } = patch;
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(age) = age {
            self.age = age;
        }
        if let Some(phone) = phone {
            self.phone = phone;
        }
        if let Some(origin_state) = origin_state {
            self.origin_state = origin_state;
        }
        if let Some(skill) = skill {
            self.skill = skill;
        }
        if let Some(photo) = photo {
            self.photo = photo;
        }
        if aadhaar.is_some() {
            self.aadhaar = aadhaar;
        }
        if let Some(status) = status {
            self.status = status;
        }
    }

    /// Case-insensitive substring match over name, skill, unique ID and state.
    pub fn matches(&self, query: &WorkerSearchQuery) -> bool {
        let needle = query.needle();
        [
            self.name.as_ref(),
            self.skill.label(),
            self.unique_id.as_ref(),
            self.origin_state.label(),
        ]
        .iter()
        .any(|haystack| haystack.to_lowercase().contains(needle))
    }
}
