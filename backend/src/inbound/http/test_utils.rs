//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, test as actix_test, web};

use super::session::SessionContext;
use super::session_config::SESSION_COOKIE_NAME;
use super::state::HttpState;
use crate::domain::ports::{
    MockAdminLoginService, MockRegistrationFlow, MockSupportDesk, MockWorkerDirectory,
    MockWorkerLoginService,
};
use crate::domain::{AdminId, AdminRole, AdminUser, Error, WorkerId};

/// Every test app signs cookies with this key so a cookie minted by one app
/// is accepted by another.
const TEST_KEY: [u8; 64] = [7; 64];

/// Session middleware with a fixed key and the `Secure` flag off for plain
/// HTTP test requests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::from(&TEST_KEY))
        .cookie_name(SESSION_COOKIE_NAME.to_owned())
        .cookie_secure(false)
        .build()
}

/// The session cookie set by `res`.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(|cookie| cookie.into_owned())
        .expect("session cookie set")
}

/// Mocks for every driving port; unused mocks panic only if called.
#[derive(Default)]
pub struct MockPorts {
    pub workers: MockWorkerDirectory,
    pub support: MockSupportDesk,
    pub worker_login: MockWorkerLoginService,
    pub admin_login: MockAdminLoginService,
    pub registration: MockRegistrationFlow,
}

impl MockPorts {
    pub fn into_state(self) -> HttpState {
        HttpState {
            workers: Arc::new(self.workers),
            support: Arc::new(self.support),
            worker_login: Arc::new(self.worker_login),
            admin_login: Arc::new(self.admin_login),
            registration: Arc::new(self.registration),
        }
    }
}

/// Full API under `/api/v1` backed by `state`.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(test_session_middleware())
        .service(web::scope("/api/v1").configure(super::configure))
}

pub fn admin_user(role: AdminRole) -> AdminUser {
    AdminUser::new(
        AdminId::new("1").expect("admin id"),
        "Admin User",
        "admin@migii.com",
        role,
    )
}

/// Session cookie for an administrator with `role`.
pub async fn admin_cookie(role: AdminRole) -> Cookie<'static> {
    mint_cookie(move |session: SessionContext| async move {
        session.persist_admin(&admin_user(role))?;
        Ok::<_, Error>(HttpResponse::Ok().finish())
    })
    .await
}

/// Session cookie for the worker stored under `sequence`.
pub async fn worker_cookie(sequence: u64) -> Cookie<'static> {
    mint_cookie(move |session: SessionContext| async move {
        session.persist_worker(&WorkerId::from_sequence(sequence))?;
        Ok::<_, Error>(HttpResponse::Ok().finish())
    })
    .await
}

async fn mint_cookie<F, Fut>(sign_in: F) -> Cookie<'static>
where
    F: Fn(SessionContext) -> Fut + Clone + 'static,
    Fut: std::future::Future<Output = Result<HttpResponse, Error>> + 'static,
{
    let app = actix_test::init_service(
        App::new()
            .wrap(test_session_middleware())
            .route("/sign-in", web::post().to(sign_in)),
    )
    .await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post().uri("/sign-in").to_request(),
    )
    .await;
    assert!(res.status().is_success(), "sign-in failed: {}", res.status());
    session_cookie(&res)
}
