//! Port abstraction for support ticket storage.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    NewSupportRequest, SupportRequest, SupportRequestId, SupportRequestPatch,
    SupportRequestValidationError,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by support request repository adapters.
    pub enum SupportRequestRepositoryError {
        /// Store could not be reached.
        Connection { message: String } =>
            "support request repository connection failed: {message}",
        /// Read or mutation failed during execution.
        Query { message: String } =>
            "support request repository query failed: {message}",
        /// The merged record would break the resolution invariant.
        Rejected { reason: SupportRequestValidationError } =>
            "support request update rejected: {reason}",
    }
}

/// Append, list and merge operations over support tickets. Tickets are never
/// deleted.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SupportRequestRepository: Send + Sync {
    /// Store a ticket under the next sequential id.
    async fn insert(
        &self,
        request: NewSupportRequest,
    ) -> Result<SupportRequest, SupportRequestRepositoryError>;

    /// Every ticket in insertion order.
    async fn list(&self) -> Result<Vec<SupportRequest>, SupportRequestRepositoryError>;

    /// Merge `patch` into a ticket; `now` fills a missing resolution time.
    async fn update(
        &self,
        id: &SupportRequestId,
        patch: SupportRequestPatch,
        now: DateTime<Utc>,
    ) -> Result<Option<SupportRequest>, SupportRequestRepositoryError>;
}
