//! Derived worker identifiers: `<STATE>-MIG-<YYYYMMDD>-<NNNNN>`.

use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveDate;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::OriginState;

/// Lowest five-digit suffix.
pub const SUFFIX_MIN: u32 = 10_000;
/// Highest five-digit suffix.
pub const SUFFIX_MAX: u32 = 99_999;

static UNIQUE_ID_RE: OnceLock<Regex> = OnceLock::new();

fn unique_id_regex() -> &'static Regex {
    UNIQUE_ID_RE.get_or_init(|| {
        Regex::new(r"^[A-Z]{2}-MIG-\d{8}-\d{5}$")
            .unwrap_or_else(|error| panic!("unique id regex failed to compile: {error}"))
    })
}

/// Error returned when a string is not a well-formed unique ID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unique id must match <STATE>-MIG-<YYYYMMDD>-<NNNNN>: {0}")]
pub struct InvalidUniqueId(String);

/// Worker unique identifier encoding origin state, registration date and a
/// random suffix.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use migii::domain::{OriginState, UniqueId};
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 9).expect("valid date");
/// let id = UniqueId::issue(OriginState::Kerala, date, 12345);
/// assert_eq!(id.as_ref(), "KE-MIG-20240309-12345");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UniqueId(String);

impl UniqueId {
    /// Parse an existing identifier.
    pub fn parse(raw: impl Into<String>) -> Result<Self, InvalidUniqueId> {
        let raw = raw.into();
        let normalised = raw.trim().to_ascii_uppercase();
        if unique_id_regex().is_match(&normalised) {
            Ok(Self(normalised))
        } else {
            Err(InvalidUniqueId(raw))
        }
    }

    /// Build the identifier for a worker registered on `date`.
    ///
    /// `suffix` is clamped into the five-digit range.
    pub fn issue(state: OriginState, date: NaiveDate, suffix: u32) -> Self {
        let suffix = suffix.clamp(SUFFIX_MIN, SUFFIX_MAX);
        Self(format!(
            "{}-MIG-{}-{suffix}",
            state.id_prefix(),
            date.format("%Y%m%d")
        ))
    }
}

impl AsRef<str> for UniqueId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UniqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<UniqueId> for String {
    fn from(value: UniqueId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UniqueId {
    type Error = InvalidUniqueId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

/// Source of the random five-digit suffix.
pub trait UniqueIdSuffix: Send + Sync {
    /// Next suffix in `SUFFIX_MIN..=SUFFIX_MAX`.
    fn next_suffix(&self) -> u32;
}

/// Thread-local RNG backed suffix source.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSuffix;

impl UniqueIdSuffix for RandomSuffix {
    fn next_suffix(&self) -> u32 {
        rand::thread_rng().gen_range(SUFFIX_MIN..=SUFFIX_MAX)
    }
}

/// Suffix source returning the same value every time.
#[derive(Debug, Clone, Copy)]
pub struct FixedSuffix(pub u32);

impl UniqueIdSuffix for FixedSuffix {
    fn next_suffix(&self) -> u32 {
        self.0
    }
}
