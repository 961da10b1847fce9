//! Worker-submitted help tickets.
//!
//! A ticket stores its resolution timestamp in place of a separate status flag,
//! so `resolvedAt` exists exactly when the ticket is resolved. The wire form
//! still exposes both `status` and `resolvedAt`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::WorkerId;

/// Validation errors raised by support request constructors and merges.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SupportRequestValidationError {
    /// Identifier was blank.
    #[error("support request id must not be empty")]
    EmptyId,
    /// Message was blank once trimmed.
    #[error("Please enter a message")]
    EmptyMessage,
    /// Status label is not `pending` or `resolved`.
    #[error("unknown support request status: {0}")]
    UnknownStatus(String),
    /// A resolution time was supplied for a ticket that is not resolved.
    #[error("resolvedAt may only be set on resolved requests")]
    ResolvedAtWithoutResolution,
}

/// Store key for a support request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SupportRequestId(String);

impl SupportRequestId {
    /// Validate and construct a [`SupportRequestId`].
    pub fn new(id: impl Into<String>) -> Result<Self, SupportRequestValidationError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(SupportRequestValidationError::EmptyId);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Key for the `sequence`-th stored request.
    pub fn from_sequence(sequence: u64) -> Self {
        Self(sequence.to_string())
    }
}

impl AsRef<str> for SupportRequestId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for SupportRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<SupportRequestId> for String {
    fn from(value: SupportRequestId) -> Self {
        value.0
    }
}

impl TryFrom<String> for SupportRequestId {
    type Error = SupportRequestValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Non-empty ticket text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SupportMessage(String);

impl SupportMessage {
    /// Validate and construct a message; surrounding whitespace is dropped.
    pub fn new(message: impl Into<String>) -> Result<Self, SupportRequestValidationError> {
        let message = message.into();
        let trimmed = message.trim();
        if trimmed.is_empty() {
            return Err(SupportRequestValidationError::EmptyMessage);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for SupportMessage {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<SupportMessage> for String {
    fn from(value: SupportMessage) -> Self {
        value.0
    }
}

impl TryFrom<String> for SupportMessage {
    type Error = SupportRequestValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Ticket status label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SupportStatus {
    Pending,
    Resolved,
}

impl FromStr for SupportStatus {
    type Err = SupportRequestValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "resolved" => Ok(Self::Resolved),
            _ => Err(SupportRequestValidationError::UnknownStatus(raw.to_owned())),
        }
    }
}

/// A ticket about to be stored; the store assigns its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSupportRequest {
    pub worker_id: WorkerId,
    pub message: SupportMessage,
    pub created_at: DateTime<Utc>,
}

impl NewSupportRequest {
    /// Materialise as a pending ticket under `id`.
    pub fn into_request(self, id: SupportRequestId) -> SupportRequest {
        SupportRequest {
            id,
            worker_id: self.worker_id,
            message: self.message,
            created_at: self.created_at,
            resolved_at: None,
        }
    }
}

/// Partial update merged into a ticket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupportRequestPatch {
    pub message: Option<SupportMessage>,
    pub status: Option<SupportStatus>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl SupportRequestPatch {
    /// Patch resolving a ticket at `at`.
    pub fn resolve(at: DateTime<Utc>) -> Self {
        Self {
            status: Some(SupportStatus::Resolved),
            resolved_at: Some(at),
            ..Self::default()
        }
    }
}

/// Stored support request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "SupportRequestRecord", try_from = "SupportRequestRecord")]
pub struct SupportRequest {
    id: SupportRequestId,
    worker_id: WorkerId,
    message: SupportMessage,
    created_at: DateTime<Utc>,
    resolved_at: Option<DateTime<Utc>>,
}

impl SupportRequest {
    pub fn id(&self) -> &SupportRequestId {
        &self.id
    }

    /// Referenced worker; may no longer exist.
    pub fn worker_id(&self) -> &WorkerId {
        &self.worker_id
    }

    pub fn message(&self) -> &SupportMessage {
        &self.message
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn resolved_at(&self) -> Option<DateTime<Utc>> {
        self.resolved_at
    }

    pub fn status(&self) -> SupportStatus {
        if self.resolved_at.is_some() {
            SupportStatus::Resolved
        } else {
            SupportStatus::Pending
        }
    }

    /// Merge `patch`, leaving the ticket untouched when the merge is rejected.
    ///
    /// Resolving without an explicit timestamp keeps an earlier resolution time
    /// or falls back to `now`. Returning a ticket to pending clears the
    /// resolution time.
    ///
    /// # Examples
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use migii::domain::{
    ///     NewSupportRequest, SupportMessage, SupportRequestId, SupportRequestPatch,
    ///     SupportStatus, WorkerId,
    /// };
    ///
    /// let created = Utc.with_ymd_and_hms(2023, 5, 15, 0, 0, 0).unwrap();
    /// let mut ticket = NewSupportRequest {
    ///     worker_id: WorkerId::from_sequence(1),
    ///     message: SupportMessage::new("Need help").unwrap(),
    ///     created_at: created,
    /// }
    /// .into_request(SupportRequestId::from_sequence(1));
    ///
    /// let resolved = Utc.with_ymd_and_hms(2023, 5, 16, 0, 0, 0).unwrap();
    /// ticket.apply(SupportRequestPatch::resolve(resolved), created).unwrap();
    /// assert_eq!(ticket.status(), SupportStatus::Resolved);
    /// assert_eq!(ticket.resolved_at(), Some(resolved));
    /// ```
    pub fn apply(
        &mut self,
        patch: SupportRequestPatch,
        now: DateTime<Utc>,
    ) -> Result<(), SupportRequestValidationError> {
        let SupportRequestPatch {
            message,
            status,
            resolved_at,
        } = patch;
        let resolution = match (status.unwrap_or(self.status()), resolved_at) {
            (SupportStatus::Pending, Some(_)) => {
                return Err(SupportRequestValidationError::ResolvedAtWithoutResolution);
            }
            (SupportStatus::Pending, None) => None,
            (SupportStatus::Resolved, Some(at)) => Some(at),
            (SupportStatus::Resolved, None) => Some(self.resolved_at.unwrap_or(now)),
        };
        if let Some(message) = message {
            self.message = message;
        }
        self.resolved_at = resolution;
        Ok(())
    }
}

/// Wire shape of a [`SupportRequest`].
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupportRequestRecord {
    #[schema(value_type = String, example = "1")]
    id: SupportRequestId,
    #[schema(value_type = String, example = "1")]
    worker_id: WorkerId,
    #[schema(value_type = String, example = "Need assistance with payment issues")]
    message: SupportMessage,
    status: SupportStatus,
    created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    resolved_at: Option<DateTime<Utc>>,
}

impl From<SupportRequest> for SupportRequestRecord {
    fn from(value: SupportRequest) -> Self {
        let status = value.status();
        Self {
            id: value.id,
            worker_id: value.worker_id,
            message: value.message,
            status,
            created_at: value.created_at,
            resolved_at: value.resolved_at,
        }
    }
}

impl TryFrom<SupportRequestRecord> for SupportRequest {
    type Error = SupportRequestValidationError;

    fn try_from(value: SupportRequestRecord) -> Result<Self, Self::Error> {
        let resolved_at = match (value.status, value.resolved_at) {
            (SupportStatus::Pending, Some(_)) => {
                return Err(SupportRequestValidationError::ResolvedAtWithoutResolution);
            }
            (SupportStatus::Pending, None) => None,
            // A resolved record without a timestamp falls back to its creation time.
            (SupportStatus::Resolved, at) => Some(at.unwrap_or(value.created_at)),
        };
        Ok(Self {
            id: value.id,
            worker_id: value.worker_id,
            message: value.message,
            created_at: value.created_at,
            resolved_at,
        })
    }
}
