//! Tests for login and logout handlers.

use super::*;
use crate::domain::AdminRole;
use crate::domain::ports::OtpDispatch;
use crate::test_support::sample_worker;
use crate::inbound::http::test_utils::{
    MockPorts, admin_cookie, admin_user, session_cookie, test_app,
};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

async fn post_json(ports: MockPorts, uri: &str, body: Value) -> (StatusCode, Value) {
    let app = actix_test::init_service(test_app(ports.into_state())).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(uri)
            .set_json(body)
            .to_request(),
    )
    .await;
    let status = res.status();
    let body: Value = actix_test::read_body_json(res).await;
    (status, body)
}

#[rstest]
#[actix_web::test]
async fn admin_login_returns_the_account_and_a_session() {
    let mut ports = MockPorts::default();
    ports
        .admin_login
        .expect_admin_login()
        .withf(|credentials| credentials.email() == "admin@migii.com")
        .times(1)
        .returning(|_| Ok(Some(admin_user(AdminRole::Admin))));
    let app = actix_test::init_service(test_app(ports.into_state())).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/auth/admin/login")
            .set_json(json!({"email": "admin@migii.com", "password": "admin123"}))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let cookie = session_cookie(&res);
    assert!(cookie.http_only().unwrap_or(false));
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["email"], "admin@migii.com");
    assert_eq!(body["role"], "admin");
}

#[rstest]
#[actix_web::test]
async fn admin_login_rejects_unknown_credentials() {
    let mut ports = MockPorts::default();
    ports.admin_login.expect_admin_login().returning(|_| Ok(None));
    let (status, body) = post_json(
        ports,
        "/api/v1/auth/admin/login",
        json!({"email": "admin@migii.com", "password": "wrong"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials. Please try again.");
}

#[rstest]
#[case("not-an-email", "admin123", "email", "invalid_email")]
#[case("admin@migii.com", "", "password", "empty_password")]
#[actix_web::test]
async fn admin_login_validates_fields_before_lookup(
    #[case] email: &str,
    #[case] password: &str,
    #[case] field: &str,
    #[case] code: &str,
) {
    let mut ports = MockPorts::default();
    ports.admin_login.expect_admin_login().never();
    let (status, body) = post_json(
        ports,
        "/api/v1/auth/admin/login",
        json!({"email": email, "password": password}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["code"], code);
}

#[rstest]
#[case(OtpDispatch::Sent, "OTP sent successfully to your phone", false)]
#[case(
    OtpDispatch::SentInDemoMode,
    "OTP sent successfully to your phone (demo mode)",
    true
)]
#[actix_web::test]
async fn otp_request_reports_dispatch(
    #[case] dispatch: OtpDispatch,
    #[case] message: &str,
    #[case] demo_mode: bool,
) {
    let mut ports = MockPorts::default();
    ports
        .worker_login
        .expect_request_login_otp()
        .returning(move |_| Ok(Some(dispatch)));
    let (status, body) = post_json(
        ports,
        "/api/v1/auth/worker/otp",
        json!({"phone": "9876543210"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], message);
    assert_eq!(body["demoMode"], demo_mode);
}

#[rstest]
#[actix_web::test]
async fn otp_request_for_unknown_phone_is_not_found() {
    let mut ports = MockPorts::default();
    ports
        .worker_login
        .expect_request_login_otp()
        .returning(|_| Ok(None));
    let (status, body) = post_json(
        ports,
        "/api/v1/auth/worker/otp",
        json!({"phone": "9000000000"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["message"],
        "No worker found with this phone number. Please register first."
    );
}

#[rstest]
#[actix_web::test]
async fn otp_request_rejects_malformed_phone() {
    let mut ports = MockPorts::default();
    ports.worker_login.expect_request_login_otp().never();
    let (status, body) =
        post_json(ports, "/api/v1/auth/worker/otp", json!({"phone": "12345"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please enter a valid phone number");
}

#[rstest]
#[actix_web::test]
async fn worker_login_sets_session_for_the_worker() {
    let mut ports = MockPorts::default();
    ports
        .worker_login
        .expect_login_with_otp()
        .returning(|_, _| Ok(Some(WorkerId::from_sequence(2))));
    ports
        .workers
        .expect_fetch_worker_by_id()
        .withf(|id| id.as_ref() == "2")
        .returning(|_| Ok(Some(sample_worker(2))));
    ports
        .support
        .expect_support_requests_for()
        .returning(|_| Ok(Vec::new()));
    let app = actix_test::init_service(test_app(ports.into_state())).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/auth/worker/login")
            .set_json(json!({"phone": "8765432109", "otp": "123456"}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let cookie = session_cookie(&res);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["workerId"], "2");

    let me = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/me")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(me.status(), StatusCode::OK);
}

#[rstest]
#[case("12345", StatusCode::BAD_REQUEST, "Please enter a valid 6-digit OTP")]
#[case("654321", StatusCode::UNAUTHORIZED, "Invalid OTP. Please try again.")]
#[actix_web::test]
async fn worker_login_refusals(
    #[case] otp: &str,
    #[case] status: StatusCode,
    #[case] message: &str,
) {
    let mut ports = MockPorts::default();
    ports
        .worker_login
        .expect_login_with_otp()
        .returning(|_, _| Ok(None));
    let (actual, body) = post_json(
        ports,
        "/api/v1/auth/worker/login",
        json!({"phone": "9876543210", "otp": otp}),
    )
    .await;
    assert_eq!(actual, status);
    assert_eq!(body["message"], message);
}

#[rstest]
#[actix_web::test]
async fn logout_drops_the_admin_session() {
    let app = actix_test::init_service(test_app(MockPorts::default().into_state())).await;
    let cookie = admin_cookie(AdminRole::Admin).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/auth/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    let cleared = session_cookie(&res);
    assert_eq!(cleared.value(), "");
}

#[rstest]
#[actix_web::test]
async fn malformed_json_uses_the_error_envelope() {
    let app = actix_test::init_service(test_app(MockPorts::default().into_state())).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/auth/worker/otp")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"phone\":")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["code"], "invalid_json");
}
