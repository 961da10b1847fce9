//! One-time codes and the demo-mode rules for accepting them.
//!
//! Codes are not generated; every flow checks against [`DEMO_OTP`]. With demo
//! mode enabled, registration also accepts any six-digit code and tolerates a
//! failed SMS dispatch.

use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

/// Fixed code accepted by every OTP check.
pub const DEMO_OTP: &str = "123456";

static SIX_DIGITS_RE: OnceLock<Regex> = OnceLock::new();

fn six_digits_regex() -> &'static Regex {
    SIX_DIGITS_RE.get_or_init(|| {
        Regex::new(r"^\d{6}$")
            .unwrap_or_else(|error| panic!("otp regex failed to compile: {error}"))
    })
}

/// Error returned for a blank code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Please enter the OTP")]
pub struct EmptyOtp;

/// Code typed by the user, trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct OtpCode(String);

impl OtpCode {
    /// Construct a code from raw input.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, EmptyOtp> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(EmptyOtp);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Whether this is the fixed demo code.
    pub fn is_demo_code(&self) -> bool {
        self.0 == DEMO_OTP
    }

    /// Whether the code is exactly six ASCII digits.
    pub fn is_six_digits(&self) -> bool {
        six_digits_regex().is_match(&self.0)
    }
}

impl AsRef<str> for OtpCode {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for OtpCode {
    type Error = EmptyOtp;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Switches between strict and demo-lenient OTP handling.
///
/// # Examples
/// ```
/// use migii::domain::{OtpCode, OtpPolicy};
///
/// let code = OtpCode::new("654321").unwrap();
/// assert!(OtpPolicy::demo().accepts_registration_code(&code));
/// assert!(!OtpPolicy::strict().accepts_registration_code(&code));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OtpPolicy {
    demo_mode: bool,
}

impl OtpPolicy {
    /// Policy with demo fallbacks enabled.
    pub const fn demo() -> Self {
        Self { demo_mode: true }
    }

    /// Policy that only accepts the demo code and propagates failures.
    pub const fn strict() -> Self {
        Self { demo_mode: false }
    }

    /// Build from the configured flag.
    pub const fn from_demo_mode(demo_mode: bool) -> Self {
        Self { demo_mode }
    }

    pub const fn demo_mode(self) -> bool {
        self.demo_mode
    }

    /// Registration accepts the demo code, or any six digits in demo mode.
    pub fn accepts_registration_code(self, code: &OtpCode) -> bool {
        code.is_demo_code() || (self.demo_mode && code.is_six_digits())
    }

    /// Worker login only ever accepts the demo code.
    pub fn accepts_login_code(self, code: &OtpCode) -> bool {
        code.is_demo_code()
    }
}

impl Default for OtpPolicy {
    fn default() -> Self {
        Self::demo()
    }
}
