//! Port abstraction for worker storage adapters and their errors.

use async_trait::async_trait;

use crate::domain::{
    PhoneNumber, UniqueId, Worker, WorkerDraft, WorkerId, WorkerPatch, WorkerSearchQuery,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by worker repository adapters.
    pub enum WorkerRepositoryError {
        /// Store could not be reached.
        Connection { message: String } => "worker repository connection failed: {message}",
        /// Read or mutation failed during execution.
        Query { message: String } => "worker repository query failed: {message}",
    }
}

/// Create, read, update, delete and search over worker records.
///
/// Lookups signal absence with `None` or `false`; errors are reserved for
/// adapter failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkerRepository: Send + Sync {
    /// Store a new worker under the next sequential id.
    async fn insert(&self, draft: WorkerDraft) -> Result<Worker, WorkerRepositoryError>;

    /// Every worker in insertion order.
    async fn list(&self) -> Result<Vec<Worker>, WorkerRepositoryError>;

    async fn find_by_id(&self, id: &WorkerId) -> Result<Option<Worker>, WorkerRepositoryError>;

    async fn find_by_phone(
        &self,
        phone: &PhoneNumber,
    ) -> Result<Option<Worker>, WorkerRepositoryError>;

    async fn find_by_unique_id(
        &self,
        unique_id: &UniqueId,
    ) -> Result<Option<Worker>, WorkerRepositoryError>;

    /// Merge `patch` into the stored record, returning the result.
    async fn update(
        &self,
        id: &WorkerId,
        patch: WorkerPatch,
    ) -> Result<Option<Worker>, WorkerRepositoryError>;

    /// Remove a record; `true` when something was removed.
    async fn delete(&self, id: &WorkerId) -> Result<bool, WorkerRepositoryError>;

    /// Workers matching a non-blank query.
    async fn search(
        &self,
        query: &WorkerSearchQuery,
    ) -> Result<Vec<Worker>, WorkerRepositoryError>;
}

/// Fixture repository that stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureWorkerRepository;

#[async_trait]
impl WorkerRepository for FixtureWorkerRepository {
    async fn insert(&self, draft: WorkerDraft) -> Result<Worker, WorkerRepositoryError> {
        Ok(draft.into_worker(WorkerId::from_sequence(1)))
    }

    async fn list(&self) -> Result<Vec<Worker>, WorkerRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_id(&self, _id: &WorkerId) -> Result<Option<Worker>, WorkerRepositoryError> {
        Ok(None)
    }

    async fn find_by_phone(
        &self,
        _phone: &PhoneNumber,
    ) -> Result<Option<Worker>, WorkerRepositoryError> {
        Ok(None)
    }

    async fn find_by_unique_id(
        &self,
        _unique_id: &UniqueId,
    ) -> Result<Option<Worker>, WorkerRepositoryError> {
        Ok(None)
    }

    async fn update(
        &self,
        _id: &WorkerId,
        _patch: WorkerPatch,
    ) -> Result<Option<Worker>, WorkerRepositoryError> {
        Ok(None)
    }

    async fn delete(&self, _id: &WorkerId) -> Result<bool, WorkerRepositoryError> {
        Ok(false)
    }

    async fn search(
        &self,
        _query: &WorkerSearchQuery,
    ) -> Result<Vec<Worker>, WorkerRepositoryError> {
        Ok(Vec::new())
    }
}
