//! Admin workflows over the seeded in-memory stores.

mod support;

use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use migii::domain::OtpPolicy;
use rstest::rstest;
use serde_json::json;
use support::client;

#[rstest]
#[case("admin@migii.com", "admin123", "admin")]
#[case("support@migii.com", "support123", "support")]
#[actix_web::test]
async fn demo_accounts_sign_in(#[case] email: &str, #[case] password: &str, #[case] role: &str) {
    let mut client = client(OtpPolicy::demo()).await;
    let reply = client.admin_login(email, password).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["email"], email);
    assert_eq!(reply.body["role"], role);
}

#[rstest]
#[case("wrong")]
#[case("wrongpass")]
#[case("support123")]
#[actix_web::test]
async fn wrong_password_is_refused(#[case] password: &str) {
    let mut client = client(OtpPolicy::demo()).await;
    let reply = client.admin_login("admin@migii.com", password).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.body["message"], "Invalid credentials. Please try again.");

    let listing = client.get("/api/v1/workers").await;
    assert_eq!(listing.status, StatusCode::UNAUTHORIZED);
}

#[rstest]
#[case("carpentry", &["1"])]
#[case("BIHAR", &["2"])]
#[case("", &["1", "2", "3"])]
#[case("9876543210", &[])]
#[actix_web::test]
async fn search_matches_seeded_workers(#[case] q: &str, #[case] ids: &[&str]) {
    let mut client = client(OtpPolicy::demo()).await;
    client.admin_login("admin@migii.com", "admin123").await;
    let reply = client.get(&format!("/api/v1/workers?q={q}")).await;
    assert_eq!(reply.status, StatusCode::OK);
    let found: Vec<&str> = reply
        .body
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|worker| worker["id"].as_str())
        .collect();
    assert_eq!(found, ids);
}

#[rstest]
#[actix_web::test]
async fn deleted_worker_is_gone() {
    let mut client = client(OtpPolicy::demo()).await;
    client.admin_login("admin@migii.com", "admin123").await;

    let deleted = client.send(TestRequest::delete().uri("/api/v1/workers/3")).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let fetched = client.get("/api/v1/workers/3").await;
    assert_eq!(fetched.status, StatusCode::NOT_FOUND);
    assert_eq!(fetched.body["message"], "Worker not found");

    let again = client.send(TestRequest::delete().uri("/api/v1/workers/3")).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn status_edit_keeps_the_unique_id() {
    let mut client = client(OtpPolicy::demo()).await;
    client.admin_login("support@migii.com", "support123").await;
    let reply = client
        .send(
            TestRequest::patch()
                .uri("/api/v1/workers/3")
                .set_json(json!({"status": "active"})),
        )
        .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["status"], "active");
    assert_eq!(reply.body["uniqueId"], "UP-MIG-20230410-76543");
}

#[rstest]
#[actix_web::test]
async fn resolving_a_ticket_stamps_resolved_at() {
    let mut client = client(OtpPolicy::demo()).await;
    client.admin_login("admin@migii.com", "admin123").await;

    let before = client.get("/api/v1/support-requests").await;
    assert_eq!(before.body[0]["status"], "pending");
    assert!(before.body[0].get("resolvedAt").is_none());

    let resolved = client
        .post("/api/v1/support-requests/1/resolve", json!({}))
        .await;
    assert_eq!(resolved.status, StatusCode::OK);
    assert_eq!(resolved.body["status"], "resolved");
    assert!(resolved.body["resolvedAt"].is_string());

    let reopened = client
        .send(
            TestRequest::patch()
                .uri("/api/v1/support-requests/1")
                .set_json(json!({"status": "pending"})),
        )
        .await;
    assert_eq!(reopened.status, StatusCode::OK);
    assert!(reopened.body.get("resolvedAt").is_none());
}

#[rstest]
#[actix_web::test]
async fn pending_ticket_cannot_carry_a_resolution_time() {
    let mut client = client(OtpPolicy::demo()).await;
    client.admin_login("admin@migii.com", "admin123").await;
    let reply = client
        .send(
            TestRequest::patch()
                .uri("/api/v1/support-requests/1")
                .set_json(json!({"status": "pending", "resolvedAt": "2023-05-20T00:00:00Z"})),
        )
        .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["details"]["code"], "resolution_mismatch");
}

#[rstest]
#[actix_web::test]
async fn overview_summarises_the_seed_data() {
    let mut client = client(OtpPolicy::demo()).await;
    client.admin_login("admin@migii.com", "admin123").await;
    let reply = client.get("/api/v1/admin/overview").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(
        reply.body["totals"],
        json!({"workers": 3, "activeWorkers": 2, "pendingWorkers": 1, "pendingRequests": 1})
    );
    assert_eq!(
        reply.body["registrationsByMonth"],
        json!([{"month": "Apr 2023", "registrations": 3}])
    );
}

#[rstest]
#[actix_web::test]
async fn logout_ends_admin_access() {
    let mut client = client(OtpPolicy::demo()).await;
    client.admin_login("admin@migii.com", "admin123").await;
    let out = client.post("/api/v1/auth/logout", json!({})).await;
    assert_eq!(out.status, StatusCode::NO_CONTENT);
    assert_eq!(
        client.get("/api/v1/admin/overview").await.status,
        StatusCode::UNAUTHORIZED
    );
}
