//! Driving port for support ticket workflows.

use async_trait::async_trait;

use crate::domain::{
    Error, SupportMessage, SupportRequest, SupportRequestId, SupportRequestPatch, WorkerId,
};

/// Domain use-case port for raising and resolving support requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SupportDesk: Send + Sync {
    async fn fetch_support_requests(&self) -> Result<Vec<SupportRequest>, Error>;

    /// Tickets raised by one worker.
    async fn support_requests_for(
        &self,
        worker_id: &WorkerId,
    ) -> Result<Vec<SupportRequest>, Error>;

    /// Raise a pending ticket.
    async fn create_support_request(
        &self,
        worker_id: &WorkerId,
        message: SupportMessage,
    ) -> Result<SupportRequest, Error>;

    /// Merge ticket fields; `None` when the ticket does not exist.
    async fn update_support_request(
        &self,
        id: &SupportRequestId,
        patch: SupportRequestPatch,
    ) -> Result<Option<SupportRequest>, Error>;

    /// Mark a ticket resolved now.
    async fn resolve_support_request(
        &self,
        id: &SupportRequestId,
    ) -> Result<Option<SupportRequest>, Error>;
}
