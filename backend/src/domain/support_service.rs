//! Support request Mock API service.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    ApiOperation, SupportDesk, SupportRequestRepository, SupportRequestRepositoryError,
};
use crate::domain::{
    Error, MockApiRuntime, NewSupportRequest, SupportMessage, SupportRequest, SupportRequestId,
    SupportRequestPatch, SupportStatus, WorkerId,
};

fn map_repository_error(error: SupportRequestRepositoryError) -> Error {
    match error {
        SupportRequestRepositoryError::Connection { message } => Error::service_unavailable(
            format!("support request repository unavailable: {message}"),
        ),
        SupportRequestRepositoryError::Query { message } => {
            Error::internal(format!("support request repository error: {message}"))
        }
        SupportRequestRepositoryError::Rejected { reason } => {
            Error::invalid_request(reason.to_string()).with_details(json!({
                "field": "resolvedAt",
                "code": "resolution_mismatch",
            }))
        }
    }
}

/// Support desk service implementing [`SupportDesk`].
#[derive(Clone)]
pub struct SupportDeskService<R> {
    requests: Arc<R>,
    runtime: MockApiRuntime,
}

impl<R> SupportDeskService<R> {
    pub fn new(requests: Arc<R>, runtime: MockApiRuntime) -> Self {
        Self { requests, runtime }
    }
}

#[async_trait]
impl<R> SupportDesk for SupportDeskService<R>
where
    R: SupportRequestRepository,
{
    async fn fetch_support_requests(&self) -> Result<Vec<SupportRequest>, Error> {
        self.runtime
            .latency
            .pause(ApiOperation::FetchSupportRequests)
            .await;
        self.requests.list().await.map_err(map_repository_error)
    }

    async fn support_requests_for(
        &self,
        worker_id: &WorkerId,
    ) -> Result<Vec<SupportRequest>, Error> {
        let mut requests = self.fetch_support_requests().await?;
        requests.retain(|request| request.worker_id() == worker_id);
        Ok(requests)
    }

    async fn create_support_request(
        &self,
        worker_id: &WorkerId,
        message: SupportMessage,
    ) -> Result<SupportRequest, Error> {
        self.runtime
            .latency
            .pause(ApiOperation::CreateSupportRequest)
            .await;
        let request = self
            .requests
            .insert(NewSupportRequest {
                worker_id: worker_id.clone(),
                message,
                created_at: self.runtime.clock.utc(),
            })
            .await
            .map_err(map_repository_error)?;
        info!(request_id = %request.id(), worker_id = %worker_id, "support request raised");
        Ok(request)
    }

    async fn update_support_request(
        &self,
        id: &SupportRequestId,
        patch: SupportRequestPatch,
    ) -> Result<Option<SupportRequest>, Error> {
        self.runtime
            .latency
            .pause(ApiOperation::UpdateSupportRequest)
            .await;
        let updated = self
            .requests
            .update(id, patch, self.runtime.clock.utc())
            .await
            .map_err(map_repository_error)?;
        if let Some(request) = updated
            .as_ref()
            .filter(|request| request.status() == SupportStatus::Resolved)
        {
            info!(request_id = %request.id(), "support request resolved");
        }
        Ok(updated)
    }

    async fn resolve_support_request(
        &self,
        id: &SupportRequestId,
    ) -> Result<Option<SupportRequest>, Error> {
        let now = self.runtime.clock.utc();
        self.update_support_request(id, SupportRequestPatch::resolve(now))
            .await
    }
}
