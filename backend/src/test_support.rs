//! Shared doubles and builders for unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::{ApiOperation, NetworkLatency, NoLatency};
use crate::domain::{
    Age, MockApiRuntime, OriginState, PhoneNumber, PhotoRef, Skill, UniqueId, Worker,
    WorkerDraft, WorkerId, WorkerName, WorkerRegistration, WorkerStatus,
};

/// Midday UTC so the local date matches the UTC date in most time zones.
pub fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

pub struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl FixtureClock {
    pub fn at(utc_now: DateTime<Utc>) -> Self {
        Self { utc_now }
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

/// Records every delayed operation.
#[derive(Default)]
pub struct RecordingLatency(pub Mutex<Vec<ApiOperation>>);

impl RecordingLatency {
    pub fn operations(&self) -> Vec<ApiOperation> {
        match self.0.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => panic!("latency mutex"),
        }
    }
}

#[async_trait]
impl NetworkLatency for RecordingLatency {
    async fn pause(&self, operation: ApiOperation) {
        match self.0.lock() {
            Ok(mut guard) => guard.push(operation),
            Err(_) => panic!("latency mutex"),
        }
    }
}

/// Runtime with no delay and a clock fixed at [`fixture_timestamp`].
pub fn fixture_runtime() -> MockApiRuntime {
    MockApiRuntime {
        latency: Arc::new(NoLatency),
        clock: Arc::new(FixtureClock::at(fixture_timestamp())),
    }
}

/// Valid registration for a Kerala driver.
pub fn sample_registration() -> WorkerRegistration {
    WorkerRegistration {
        name: WorkerName::new("Test User").expect("name"),
        age: Age::new(25).expect("age"),
        phone: PhoneNumber::new("9123456789").expect("phone"),
        origin_state: OriginState::Kerala,
        skill: Skill::Driving,
        photo: PhotoRef::new("blob:local/photo").expect("photo"),
        aadhaar: None,
    }
}

/// Stored worker built from [`sample_registration`].
pub fn sample_worker(id: u64) -> Worker {
    WorkerDraft {
        registration: sample_registration(),
        unique_id: UniqueId::parse("KE-MIG-20240309-12345").expect("unique id"),
        status: WorkerStatus::Active,
        created_at: fixture_timestamp(),
    }
    .into_worker(WorkerId::from_sequence(id))
}
