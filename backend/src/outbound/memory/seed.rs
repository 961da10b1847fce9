//! Demo records loaded into the in-memory stores at start-up.
//!
//! The records are declared in their wire shape and deserialised, so every
//! seeded value passes the same validation as a stored record.

use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::domain::{SupportRequest, Worker};

fn decode<T: DeserializeOwned>(records: Value) -> Result<Vec<T>, String> {
    serde_json::from_value(records).map_err(|error| format!("invalid seed record: {error}"))
}

/// The three demo workers.
pub fn seed_workers() -> Result<Vec<Worker>, String> {
    decode(json!([
        {
            "id": "1",
            "name": "Rajesh Kumar",
            "age": 32,
            "phone": "9876543210",
            "originState": "Tamil Nadu",
            "skill": "Carpentry",
            "photo": "https://randomuser.me/api/portraits/men/1.jpg",
            "aadhaar": "XXXX-XXXX-1234",
            "uniqueId": "TN-MIG-20230401-54321",
            "status": "active",
            "createdAt": "2023-04-01T00:00:00Z"
        },
        {
            "id": "2",
            "name": "Priya Singh",
            "age": 28,
            "phone": "8765432109",
            "originState": "Bihar",
            "skill": "Masonry",
            "photo": "https://randomuser.me/api/portraits/women/2.jpg",
            "uniqueId": "BH-MIG-20230405-65432",
            "status": "active",
            "createdAt": "2023-04-05T00:00:00Z"
        },
        {
            "id": "3",
            "name": "Mohammed Ali",
            "age": 35,
            "phone": "7654321098",
            "originState": "Uttar Pradesh",
            "skill": "Plumbing",
            "photo": "https://randomuser.me/api/portraits/men/3.jpg",
            "aadhaar": "XXXX-XXXX-5678",
            "uniqueId": "UP-MIG-20230410-76543",
            "status": "pending",
            "createdAt": "2023-04-10T00:00:00Z"
        }
    ]))
}

/// The two demo support requests; the second is already resolved.
pub fn seed_support_requests() -> Result<Vec<SupportRequest>, String> {
    decode(json!([
        {
            "id": "1",
            "workerId": "1",
            "message": "Need assistance with payment issues",
            "status": "pending",
            "createdAt": "2023-05-15T00:00:00Z"
        },
        {
            "id": "2",
            "workerId": "2",
            "message": "Request for ID card replacement",
            "status": "resolved",
            "createdAt": "2023-05-10T00:00:00Z",
            "resolvedAt": "2023-05-12T00:00:00Z"
        }
    ]))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{OriginState, Skill, SupportStatus, WorkerStatus};
    use rstest::rstest;

    #[rstest]
    fn seed_workers_decode() {
        let workers = seed_workers().expect("seed workers");
        assert_eq!(workers.len(), 3);
        let rajesh = &workers[0];
        assert_eq!(rajesh.origin_state(), OriginState::TamilNadu);
        assert_eq!(rajesh.skill(), Skill::Carpentry);
        assert_eq!(rajesh.unique_id().as_ref(), "TN-MIG-20230401-54321");
        assert!(workers[1].aadhaar().is_none());
        assert_eq!(workers[2].status(), WorkerStatus::Pending);
    }

    #[rstest]
    fn seed_support_requests_keep_resolution_invariant() {
        let requests = seed_support_requests().expect("seed requests");
        assert_eq!(requests[0].status(), SupportStatus::Pending);
        assert!(requests[0].resolved_at().is_none());
        assert_eq!(requests[1].status(), SupportStatus::Resolved);
        assert!(requests[1].resolved_at().is_some());
    }
}
