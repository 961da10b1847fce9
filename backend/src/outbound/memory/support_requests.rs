//! In-memory [`SupportRequestRepository`].

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{SupportRequestRepository, SupportRequestRepositoryError};
use crate::domain::{NewSupportRequest, SupportRequest, SupportRequestId, SupportRequestPatch};

use super::{Table, lock, seed_support_requests};

/// Support ticket store held in process memory.
#[derive(Debug)]
pub struct InMemorySupportRequestRepository {
    table: Mutex<Table<SupportRequest>>,
}

impl InMemorySupportRequestRepository {
    pub fn with_requests(requests: Vec<SupportRequest>) -> Self {
        Self {
            table: Mutex::new(Table::with_rows(requests, |request| request.id().as_ref())),
        }
    }

    pub fn empty() -> Self {
        Self::with_requests(Vec::new())
    }

    /// Create a store holding the demo tickets.
    pub fn seeded() -> Result<Self, SupportRequestRepositoryError> {
        seed_support_requests()
            .map(Self::with_requests)
            .map_err(SupportRequestRepositoryError::query)
    }
}

#[async_trait]
impl SupportRequestRepository for InMemorySupportRequestRepository {
    async fn insert(
        &self,
        request: NewSupportRequest,
    ) -> Result<SupportRequest, SupportRequestRepositoryError> {
        let mut table = lock(&self.table).map_err(SupportRequestRepositoryError::query)?;
        let id = SupportRequestId::from_sequence(table.take_sequence());
        let request = request.into_request(id);
        table.rows.push(request.clone());
        Ok(request)
    }

    async fn list(&self) -> Result<Vec<SupportRequest>, SupportRequestRepositoryError> {
        let table = lock(&self.table).map_err(SupportRequestRepositoryError::query)?;
        Ok(table.rows.clone())
    }

    async fn update(
        &self,
        id: &SupportRequestId,
        patch: SupportRequestPatch,
        now: DateTime<Utc>,
    ) -> Result<Option<SupportRequest>, SupportRequestRepositoryError> {
        let mut table = lock(&self.table).map_err(SupportRequestRepositoryError::query)?;
        let Some(request) = table.rows.iter_mut().find(|request| request.id() == id) else {
            return Ok(None);
        };
        request
            .apply(patch, now)
            .map_err(SupportRequestRepositoryError::rejected)?;
        Ok(Some(request.clone()))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{SupportMessage, SupportStatus, WorkerId};
    use crate::test_support::fixture_timestamp;
    use rstest::{fixture, rstest};

    #[fixture]
    fn repo() -> InMemorySupportRequestRepository {
        InMemorySupportRequestRepository::seeded().expect("seed")
    }

    fn ticket(message: &str) -> NewSupportRequest {
        NewSupportRequest {
            worker_id: WorkerId::from_sequence(1),
            message: SupportMessage::new(message).expect("message"),
            created_at: fixture_timestamp(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn sparse_ticket_ids_are_not_handed_out_again() {
        let existing = ticket("Card lost").into_request(SupportRequestId::from_sequence(5));
        let repo = InMemorySupportRequestRepository::with_requests(vec![existing]);
        let created = repo.insert(ticket("Still waiting")).await.expect("insert");
        assert_eq!(created.id().as_ref(), "6");
    }

    #[rstest]
    #[tokio::test]
    async fn insert_appends_pending_ticket(repo: InMemorySupportRequestRepository) {
        let created = repo
            .insert(NewSupportRequest {
                worker_id: WorkerId::from_sequence(3),
                message: SupportMessage::new("Lost my card").expect("message"),
                created_at: fixture_timestamp(),
            })
            .await
            .expect("insert");
        assert_eq!(created.id().as_ref(), "3");
        assert_eq!(created.status(), SupportStatus::Pending);
        assert_eq!(repo.list().await.expect("list").len(), 3);
    }

    #[rstest]
    #[tokio::test]
    async fn resolving_stamps_now(repo: InMemorySupportRequestRepository) {
        let id = SupportRequestId::from_sequence(1);
        let patch = SupportRequestPatch {
            status: Some(SupportStatus::Resolved),
            ..SupportRequestPatch::default()
        };
        let resolved = repo
            .update(&id, patch, fixture_timestamp())
            .await
            .expect("update")
            .expect("present");
        assert_eq!(resolved.resolved_at(), Some(fixture_timestamp()));
    }

    #[rstest]
    #[tokio::test]
    async fn reopening_clears_resolution(repo: InMemorySupportRequestRepository) {
        let id = SupportRequestId::from_sequence(2);
        let patch = SupportRequestPatch {
            status: Some(SupportStatus::Pending),
            ..SupportRequestPatch::default()
        };
        let reopened = repo
            .update(&id, patch, fixture_timestamp())
            .await
            .expect("update")
            .expect("present");
        assert_eq!(reopened.status(), SupportStatus::Pending);
        assert!(reopened.resolved_at().is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn inconsistent_patch_is_rejected_without_change(
        repo: InMemorySupportRequestRepository,
    ) {
        let id = SupportRequestId::from_sequence(1);
        let patch = SupportRequestPatch {
            resolved_at: Some(fixture_timestamp()),
            ..SupportRequestPatch::default()
        };
        let err = repo
            .update(&id, patch, fixture_timestamp())
            .await
            .expect_err("rejected");
        assert!(matches!(err, SupportRequestRepositoryError::Rejected { .. }));

        let stored = repo.list().await.expect("list");
        assert_eq!(stored[0].status(), SupportStatus::Pending);
    }

    #[rstest]
    #[tokio::test]
    async fn missing_ticket_is_none(repo: InMemorySupportRequestRepository) {
        let outcome = repo
            .update(
                &SupportRequestId::from_sequence(42),
                SupportRequestPatch::default(),
                fixture_timestamp(),
            )
            .await
            .expect("update");
        assert!(outcome.is_none());
    }
}
