//! Port for the artificial round-trip delay applied to every Mock API call.

use std::fmt;

use async_trait::async_trait;

/// Mock API call being delayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiOperation {
    FetchWorkers,
    FetchWorkerById,
    CreateWorker,
    UpdateWorker,
    DeleteWorker,
    SearchWorkers,
    VerifyWorkerExists,
    FetchSupportRequests,
    CreateSupportRequest,
    UpdateSupportRequest,
    SendOtp,
    LoginWithOtp,
    AdminLogin,
}

impl ApiOperation {
    /// Stable name for log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FetchWorkers => "fetch_workers",
            Self::FetchWorkerById => "fetch_worker_by_id",
            Self::CreateWorker => "create_worker",
            Self::UpdateWorker => "update_worker",
            Self::DeleteWorker => "delete_worker",
            Self::SearchWorkers => "search_workers",
            Self::VerifyWorkerExists => "verify_worker_exists",
            Self::FetchSupportRequests => "fetch_support_requests",
            Self::CreateSupportRequest => "create_support_request",
            Self::UpdateSupportRequest => "update_support_request",
            Self::SendOtp => "send_otp",
            Self::LoginWithOtp => "login_with_otp",
            Self::AdminLogin => "admin_login",
        }
    }
}

impl fmt::Display for ApiOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Suspends the caller to emulate a remote backend.
///
/// Implementations must always complete; nothing cancels or times out a pause.
#[async_trait]
pub trait NetworkLatency: Send + Sync {
    async fn pause(&self, operation: ApiOperation);
}

/// Latency that returns immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLatency;

#[async_trait]
impl NetworkLatency for NoLatency {
    async fn pause(&self, _operation: ApiOperation) {}
}
