//! Driving port for worker administration and lookups.
//!
//! Inbound adapters use this port for the admin worker list, search, details,
//! status edits and removal, and for public identity card lookups.

use async_trait::async_trait;

use crate::domain::{
    Error, PhoneNumber, UniqueId, Worker, WorkerId, WorkerPatch, WorkerRegistration,
    WorkerSearchQuery,
};

/// Domain use-case port over the worker store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkerDirectory: Send + Sync {
    /// Every registered worker.
    async fn fetch_workers(&self) -> Result<Vec<Worker>, Error>;

    async fn fetch_worker_by_id(&self, id: &WorkerId) -> Result<Option<Worker>, Error>;

    /// Store a worker with a fresh unique ID, `active` status and the current
    /// time as `createdAt`.
    async fn create_worker(&self, registration: WorkerRegistration) -> Result<Worker, Error>;

    async fn update_worker(
        &self,
        id: &WorkerId,
        patch: WorkerPatch,
    ) -> Result<Option<Worker>, Error>;

    /// `true` when a record was removed.
    async fn delete_worker(&self, id: &WorkerId) -> Result<bool, Error>;

    /// Matching workers; a blank query returns the full list.
    async fn search_workers(&self, query: &WorkerSearchQuery) -> Result<Vec<Worker>, Error>;

    async fn verify_worker_exists(&self, phone: &PhoneNumber) -> Result<bool, Error>;

    async fn find_by_unique_id(&self, unique_id: &UniqueId) -> Result<Option<Worker>, Error>;
}
