//! Read models for the admin and worker dashboards and the public ID card.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{
    OriginState, Skill, SupportRequest, SupportStatus, UniqueId, Worker, WorkerStatus,
};

/// Registrations counted for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRegistrations {
    /// Short month and year, e.g. `Apr 2023`.
    #[schema(example = "Apr 2023")]
    pub month: String,
    pub registrations: usize,
}

/// Headline counts for the dashboard cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardTotals {
    pub workers: usize,
    pub active_workers: usize,
    pub pending_workers: usize,
    pub pending_requests: usize,
}

/// Everything the admin dashboard renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminOverview {
    pub totals: DashboardTotals,
    pub registrations_by_month: Vec<MonthlyRegistrations>,
    pub workers: Vec<Worker>,
    #[schema(value_type = Vec<crate::domain::SupportRequestRecord>)]
    pub support_requests: Vec<SupportRequest>,
}

impl AdminOverview {
    /// Derive counts and the monthly series from full listings.
    pub fn summarise(workers: Vec<Worker>, support_requests: Vec<SupportRequest>) -> Self {
        let count_workers = |status: WorkerStatus| {
            workers
                .iter()
                .filter(|worker| worker.status() == status)
                .count()
        };
        let totals = DashboardTotals {
            workers: workers.len(),
            active_workers: count_workers(WorkerStatus::Active),
            pending_workers: count_workers(WorkerStatus::Pending),
            pending_requests: support_requests
                .iter()
                .filter(|request| request.status() == SupportStatus::Pending)
                .count(),
        };
        Self {
            totals,
            registrations_by_month: registrations_by_month(&workers),
            workers,
            support_requests,
        }
    }
}

/// Public identity card; the QR code on a printed card encodes `unique_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IdentityCard {
    #[schema(example = "Rajesh Kumar")]
    pub name: String,
    #[schema(value_type = String, example = "Carpentry")]
    pub skill: Skill,
    #[schema(value_type = String, example = "Tamil Nadu")]
    pub origin_state: OriginState,
    pub status: WorkerStatus,
    #[schema(value_type = String, example = "TN-MIG-20230401-54321")]
    pub unique_id: UniqueId,
    pub registered_at: DateTime<Utc>,
}

impl From<&Worker> for IdentityCard {
    fn from(worker: &Worker) -> Self {
        Self {
            name: worker.name().to_string(),
            skill: worker.skill(),
            origin_state: worker.origin_state(),
            status: worker.status(),
            unique_id: worker.unique_id().clone(),
            registered_at: worker.created_at(),
        }
    }
}

/// The signed-in worker's own dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkerDashboard {
    pub worker: Worker,
    pub id_card: IdentityCard,
    #[schema(value_type = Vec<crate::domain::SupportRequestRecord>)]
    pub support_requests: Vec<SupportRequest>,
}

impl WorkerDashboard {
    pub fn new(worker: Worker, support_requests: Vec<SupportRequest>) -> Self {
        let id_card = IdentityCard::from(&worker);
        Self {
            worker,
            id_card,
            support_requests,
        }
    }
}

/// Count registrations per calendar month, oldest month first.
pub fn registrations_by_month(workers: &[Worker]) -> Vec<MonthlyRegistrations> {
    let mut counts: BTreeMap<(i32, u32), usize> = BTreeMap::new();
    for worker in workers {
        let created = worker.created_at();
        *counts.entry((created.year(), created.month())).or_default() += 1;
    }
    counts
        .into_iter()
        .filter_map(|((year, month), registrations)| {
            NaiveDate::from_ymd_opt(year, month, 1).map(|first| MonthlyRegistrations {
                month: first.format("%b %Y").to_string(),
                registrations,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Age, NewSupportRequest, OriginState, PhoneNumber, PhotoRef, Skill, SupportMessage,
        SupportRequestId, SupportRequestPatch, UniqueId, WorkerDraft, WorkerId, WorkerName,
        WorkerRegistration,
    };
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    fn worker(id: u64, year: i32, month: u32, status: WorkerStatus) -> Worker {
        let created_at = Utc
            .with_ymd_and_hms(year, month, 10, 0, 0, 0)
            .single()
            .expect("timestamp");
        WorkerDraft {
            registration: WorkerRegistration {
                name: WorkerName::new("Worker Name").expect("name"),
                age: Age::new(30).expect("age"),
                phone: PhoneNumber::new(format!("98765432{id:02}")).expect("phone"),
                origin_state: OriginState::Bihar,
                skill: Skill::Masonry,
                photo: PhotoRef::new("photo").expect("photo"),
                aadhaar: None,
            },
            unique_id: UniqueId::parse(format!("BI-MIG-{year}{month:02}10-1234{id}"))
                .expect("unique id"),
            status,
            created_at,
        }
        .into_worker(WorkerId::from_sequence(id))
    }

    fn ticket(id: u64, resolved: bool) -> SupportRequest {
        let created = Utc
            .with_ymd_and_hms(2023, 5, 10, 0, 0, 0)
            .single()
            .expect("timestamp");
        let mut request = NewSupportRequest {
            worker_id: WorkerId::from_sequence(1),
            message: SupportMessage::new("help").expect("message"),
            created_at: created,
        }
        .into_request(SupportRequestId::from_sequence(id));
        if resolved {
            request
                .apply(SupportRequestPatch::resolve(created), created)
                .expect("resolve");
        }
        request
    }

    #[rstest]
    fn months_are_chronological_and_labelled() {
        let workers = vec![
            worker(1, 2024, 1, WorkerStatus::Active),
            worker(2, 2023, 4, WorkerStatus::Active),
            worker(3, 2023, 4, WorkerStatus::Pending),
        ];
        let series = registrations_by_month(&workers);
        assert_eq!(
            series,
            vec![
                MonthlyRegistrations {
                    month: "Apr 2023".into(),
                    registrations: 2,
                },
                MonthlyRegistrations {
                    month: "Jan 2024".into(),
                    registrations: 1,
                },
            ]
        );
    }

    #[rstest]
    fn totals_count_statuses() {
        let overview = AdminOverview::summarise(
            vec![
                worker(1, 2023, 4, WorkerStatus::Active),
                worker(2, 2023, 4, WorkerStatus::Active),
                worker(3, 2023, 4, WorkerStatus::Pending),
                worker(4, 2023, 5, WorkerStatus::Inactive),
            ],
            vec![ticket(1, false), ticket(2, true)],
        );
        assert_eq!(
            overview.totals,
            DashboardTotals {
                workers: 4,
                active_workers: 2,
                pending_workers: 1,
                pending_requests: 1,
            }
        );
    }

    #[rstest]
    fn identity_card_copies_public_fields() {
        let worker = worker(7, 2023, 4, WorkerStatus::Active);
        let card = IdentityCard::from(&worker);
        assert_eq!(card.name, "Worker Name");
        assert_eq!(card.unique_id, *worker.unique_id());
        let json = serde_json::to_value(&card).expect("serialise");
        assert_eq!(json["originState"], "Bihar");
        assert!(json.get("phone").is_none());
    }

    #[rstest]
    fn empty_store_has_empty_series() {
        let overview = AdminOverview::summarise(Vec::new(), Vec::new());
        assert!(overview.registrations_by_month.is_empty());
        assert_eq!(overview.totals, DashboardTotals::default());
    }
}
