//! Worker Mock API service.
//!
//! Implements the [`WorkerDirectory`] driving port over a [`WorkerRepository`],
//! waiting on the injected [`NetworkLatency`] before every call and deriving
//! unique IDs at creation time.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{
    ApiOperation, NetworkLatency, WorkerDirectory, WorkerRepository, WorkerRepositoryError,
};
use crate::domain::{
    Error, PhoneNumber, UniqueId, UniqueIdSuffix, Worker, WorkerDraft, WorkerId, WorkerPatch,
    WorkerRegistration, WorkerSearchQuery, WorkerStatus,
};

pub(crate) fn map_worker_repository_error(error: WorkerRepositoryError) -> Error {
    match error {
        WorkerRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("worker repository unavailable: {message}"))
        }
        WorkerRepositoryError::Query { message } => {
            Error::internal(format!("worker repository error: {message}"))
        }
    }
}

/// Collaborators shared by the Mock API services.
#[derive(Clone)]
pub struct MockApiRuntime {
    pub latency: Arc<dyn NetworkLatency>,
    pub clock: Arc<dyn Clock>,
}

/// Worker service implementing [`WorkerDirectory`].
#[derive(Clone)]
pub struct WorkerService<R> {
    workers: Arc<R>,
    runtime: MockApiRuntime,
    suffixes: Arc<dyn UniqueIdSuffix>,
}

impl<R> WorkerService<R> {
    /// Create a service over `workers` drawing unique ID suffixes from `suffixes`.
    pub fn new(
        workers: Arc<R>,
        runtime: MockApiRuntime,
        suffixes: Arc<dyn UniqueIdSuffix>,
    ) -> Self {
        Self {
            workers,
            runtime,
            suffixes,
        }
    }

    async fn pause(&self, operation: ApiOperation) {
        self.runtime.latency.pause(operation).await;
    }
}

#[async_trait]
impl<R> WorkerDirectory for WorkerService<R>
where
    R: WorkerRepository,
{
    async fn fetch_workers(&self) -> Result<Vec<Worker>, Error> {
        self.pause(ApiOperation::FetchWorkers).await;
        self.workers
            .list()
            .await
            .map_err(map_worker_repository_error)
    }

    async fn fetch_worker_by_id(&self, id: &WorkerId) -> Result<Option<Worker>, Error> {
        self.pause(ApiOperation::FetchWorkerById).await;
        self.workers
            .find_by_id(id)
            .await
            .map_err(map_worker_repository_error)
    }

    async fn create_worker(&self, registration: WorkerRegistration) -> Result<Worker, Error> {
        self.pause(ApiOperation::CreateWorker).await;
        let today = self.runtime.clock.local().date_naive();
        let unique_id = UniqueId::issue(
            registration.origin_state,
            today,
            self.suffixes.next_suffix(),
        );
        let draft = WorkerDraft {
            registration,
            unique_id,
            status: WorkerStatus::Active,
            created_at: self.runtime.clock.utc(),
        };
        let worker = self
            .workers
            .insert(draft)
            .await
            .map_err(map_worker_repository_error)?;
        info!(
            worker_id = %worker.id(),
            unique_id = %worker.unique_id(),
            "worker registered"
        );
        Ok(worker)
    }

    async fn update_worker(
        &self,
        id: &WorkerId,
        patch: WorkerPatch,
    ) -> Result<Option<Worker>, Error> {
        self.pause(ApiOperation::UpdateWorker).await;
        self.workers
            .update(id, patch)
            .await
            .map_err(map_worker_repository_error)
    }

    async fn delete_worker(&self, id: &WorkerId) -> Result<bool, Error> {
        self.pause(ApiOperation::DeleteWorker).await;
        let removed = self
            .workers
            .delete(id)
            .await
            .map_err(map_worker_repository_error)?;
        debug!(worker_id = %id, removed, "worker delete requested");
        Ok(removed)
    }

    async fn search_workers(&self, query: &WorkerSearchQuery) -> Result<Vec<Worker>, Error> {
        if query.is_blank() {
            return self.fetch_workers().await;
        }
        self.pause(ApiOperation::SearchWorkers).await;
        self.workers
            .search(query)
            .await
            .map_err(map_worker_repository_error)
    }

    async fn verify_worker_exists(&self, phone: &PhoneNumber) -> Result<bool, Error> {
        self.pause(ApiOperation::VerifyWorkerExists).await;
        self.workers
            .find_by_phone(phone)
            .await
            .map(|worker| worker.is_some())
            .map_err(map_worker_repository_error)
    }

    async fn find_by_unique_id(&self, unique_id: &UniqueId) -> Result<Option<Worker>, Error> {
        self.pause(ApiOperation::FetchWorkerById).await;
        self.workers
            .find_by_unique_id(unique_id)
            .await
            .map_err(map_worker_repository_error)
    }
}

#[cfg(test)]
#[path = "worker_service_tests.rs"]
mod tests;
