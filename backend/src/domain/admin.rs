//! Administrator identities and login credentials.
//!
//! Admin accounts are a fixed seed set; nothing in the service creates or
//! deletes them at runtime.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use zeroize::Zeroizing;

/// Domain error returned when admin login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdminLoginValidationError {
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please enter your password")]
    EmptyPassword,
    #[error("admin id must not be empty")]
    EmptyId,
    #[error("unknown admin role: {0}")]
    UnknownRole(String),
}

/// Stable administrator identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AdminId(String);

impl AdminId {
    /// Validate and construct an [`AdminId`].
    pub fn new(id: impl Into<String>) -> Result<Self, AdminLoginValidationError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(AdminLoginValidationError::EmptyId);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for AdminId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for AdminId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<AdminId> for String {
    fn from(value: AdminId) -> Self {
        value.0
    }
}

impl TryFrom<String> for AdminId {
    type Error = AdminLoginValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// What an administrator may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AdminRole {
    /// Full access.
    Admin,
    /// Handles worker records and support tickets.
    Support,
    /// Read-only access.
    Viewer,
}

impl AdminRole {
    /// Whether the role may change workers or tickets.
    pub fn can_modify(self) -> bool {
        matches!(self, Self::Admin | Self::Support)
    }
}

impl FromStr for AdminRole {
    type Err = AdminLoginValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "support" => Ok(Self::Support),
            "viewer" => Ok(Self::Viewer),
            _ => Err(AdminLoginValidationError::UnknownRole(raw.to_owned())),
        }
    }
}

/// Seeded administrator record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    #[schema(value_type = String, example = "1")]
    id: AdminId,
    #[schema(example = "Admin User")]
    name: String,
    #[schema(example = "admin@migii.com")]
    email: String,
    role: AdminRole,
}

impl AdminUser {
    /// Build an administrator record.
    pub fn new(id: AdminId, name: impl Into<String>, email: impl Into<String>, role: AdminRole) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role,
        }
    }

    pub fn id(&self) -> &AdminId {
        &self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn role(&self) -> AdminRole {
        self.role
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Validated admin login credentials.
///
/// ## Invariants
/// - `email` is trimmed, lower-cased and shaped like an address.
/// - `password` is non-empty, kept verbatim and zeroised on drop. Strength
///   rules do not apply here; a wrong password is simply no match.
///
/// # Examples
/// ```
/// use migii::domain::AdminCredentials;
///
/// let creds = AdminCredentials::try_from_parts(" Admin@Migii.com ", "admin123").unwrap();
/// assert_eq!(creds.email(), "admin@migii.com");
/// assert!(AdminCredentials::try_from_parts("admin", "admin123").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl AdminCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, AdminLoginValidationError> {
        let email = email.trim().to_ascii_lowercase();
        if !email_regex().is_match(&email) {
            return Err(AdminLoginValidationError::InvalidEmail);
        }
        if password.is_empty() {
            return Err(AdminLoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
