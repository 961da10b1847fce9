//! In-memory [`WorkerRepository`].

use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{WorkerRepository, WorkerRepositoryError};
use crate::domain::{
    PhoneNumber, UniqueId, Worker, WorkerDraft, WorkerId, WorkerPatch, WorkerSearchQuery,
};

use super::{Table, lock, seed_workers};

/// Worker store held in process memory.
#[derive(Debug)]
pub struct InMemoryWorkerRepository {
    table: Mutex<Table<Worker>>,
}

impl InMemoryWorkerRepository {
    /// Create a store holding `workers`; new ids continue after them.
    pub fn with_workers(workers: Vec<Worker>) -> Self {
        Self {
            table: Mutex::new(Table::with_rows(workers, |worker| worker.id().as_ref())),
        }
    }

    /// Create a store without records.
    pub fn empty() -> Self {
        Self::with_workers(Vec::new())
    }

    /// Create a store holding the demo workers.
    pub fn seeded() -> Result<Self, WorkerRepositoryError> {
        seed_workers()
            .map(Self::with_workers)
            .map_err(WorkerRepositoryError::query)
    }

    fn read<T>(&self, f: impl FnOnce(&[Worker]) -> T) -> Result<T, WorkerRepositoryError> {
        let table = lock(&self.table).map_err(WorkerRepositoryError::query)?;
        Ok(f(&table.rows))
    }
}

#[async_trait]
impl WorkerRepository for InMemoryWorkerRepository {
    async fn insert(&self, draft: WorkerDraft) -> Result<Worker, WorkerRepositoryError> {
        let mut table = lock(&self.table).map_err(WorkerRepositoryError::query)?;
        let id = WorkerId::from_sequence(table.take_sequence());
        let worker = draft.into_worker(id);
        table.rows.push(worker.clone());
        debug!(worker_id = %worker.id(), rows = table.rows.len(), "worker stored");
        Ok(worker)
    }

    async fn list(&self) -> Result<Vec<Worker>, WorkerRepositoryError> {
        self.read(<[Worker]>::to_vec)
    }

    async fn find_by_id(&self, id: &WorkerId) -> Result<Option<Worker>, WorkerRepositoryError> {
        self.read(|rows| rows.iter().find(|worker| worker.id() == id).cloned())
    }

    async fn find_by_phone(
        &self,
        phone: &PhoneNumber,
    ) -> Result<Option<Worker>, WorkerRepositoryError> {
        self.read(|rows| rows.iter().find(|worker| worker.phone() == phone).cloned())
    }

    async fn find_by_unique_id(
        &self,
        unique_id: &UniqueId,
    ) -> Result<Option<Worker>, WorkerRepositoryError> {
        self.read(|rows| {
            rows.iter()
                .find(|worker| worker.unique_id() == unique_id)
                .cloned()
        })
    }

    async fn update(
        &self,
        id: &WorkerId,
        patch: WorkerPatch,
    ) -> Result<Option<Worker>, WorkerRepositoryError> {
        let mut table = lock(&self.table).map_err(WorkerRepositoryError::query)?;
        let Some(worker) = table.rows.iter_mut().find(|worker| worker.id() == id) else {
            return Ok(None);
        };
        worker.apply(patch);
        Ok(Some(worker.clone()))
    }

    async fn delete(&self, id: &WorkerId) -> Result<bool, WorkerRepositoryError> {
        let mut table = lock(&self.table).map_err(WorkerRepositoryError::query)?;
        let before = table.rows.len();
        table.rows.retain(|worker| worker.id() != id);
        Ok(table.rows.len() != before)
    }

    async fn search(
        &self,
        query: &WorkerSearchQuery,
    ) -> Result<Vec<Worker>, WorkerRepositoryError> {
        self.read(|rows| {
            rows.iter()
                .filter(|worker| worker.matches(query))
                .cloned()
                .collect()
        })
    }
}
