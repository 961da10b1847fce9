//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix cookie session so handlers deal in worker ids, admin claims
//! and the registration wizard instead of raw keys.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{AdminId, AdminRole, AdminUser, Error, RegistrationWizard, WorkerId};

pub(crate) const WORKER_ID_KEY: &str = "worker_id";
pub(crate) const ADMIN_KEY: &str = "admin";
pub(crate) const WIZARD_KEY: &str = "registration";

/// Admin identity stored in the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminClaims {
    pub id: AdminId,
    pub role: AdminRole,
}

impl AdminClaims {
    /// Refuse roles that may only read.
    pub fn require_modify(&self) -> Result<(), Error> {
        if self.role.can_modify() {
            Ok(())
        } else {
            Err(Error::forbidden("Your role does not allow changes"))
        }
    }
}

impl From<&AdminUser> for AdminClaims {
    fn from(user: &AdminUser) -> Self {
        Self {
            id: user.id().clone(),
            role: user.role(),
        }
    }
}

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

fn write_failed(error: impl std::fmt::Display) -> Error {
    Error::internal(format!("failed to persist session: {error}"))
}

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Sign a worker in, dropping any admin identity.
    pub fn persist_worker(&self, worker_id: &WorkerId) -> Result<(), Error> {
        self.0.renew();
        self.0.remove(ADMIN_KEY);
        self.0
            .insert(WORKER_ID_KEY, worker_id.as_ref())
            .map_err(write_failed)
    }

    /// Sign an administrator in, dropping any worker identity.
    pub fn persist_admin(&self, admin: &AdminUser) -> Result<(), Error> {
        self.0.renew();
        self.0.remove(WORKER_ID_KEY);
        self.0
            .insert(ADMIN_KEY, AdminClaims::from(admin))
            .map_err(write_failed)
    }

    /// Worker id from the session; tampered values read as absent.
    pub fn worker_id(&self) -> Result<Option<WorkerId>, Error> {
        let raw = self
            .0
            .get::<String>(WORKER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw.and_then(|raw| match WorkerId::new(raw) {
            Ok(id) => Some(id),
            Err(error) => {
                warn!("invalid worker id in session cookie: {error}");
                None
            }
        }))
    }

    /// Require a signed-in worker or return `401 Unauthorized`.
    pub fn require_worker(&self) -> Result<WorkerId, Error> {
        self.worker_id()?
            .ok_or_else(|| Error::unauthorized("Please log in to continue"))
    }

    pub fn admin(&self) -> Option<AdminClaims> {
        match self.0.get::<AdminClaims>(ADMIN_KEY) {
            Ok(claims) => claims,
            Err(error) => {
                warn!("invalid admin claims in session cookie: {error}");
                None
            }
        }
    }

    /// Require a signed-in administrator or return `401 Unauthorized`.
    pub fn require_admin(&self) -> Result<AdminClaims, Error> {
        self.admin()
            .ok_or_else(|| Error::unauthorized("Admin login required"))
    }

    /// Require an administrator whose role may change records (`403` otherwise).
    pub fn require_admin_writer(&self) -> Result<AdminClaims, Error> {
        let claims = self.require_admin()?;
        claims.require_modify()?;
        Ok(claims)
    }

    /// The wizard in progress, or a fresh one at step 1.
    pub fn wizard(&self) -> RegistrationWizard {
        match self.0.get::<RegistrationWizard>(WIZARD_KEY) {
            Ok(wizard) => wizard.unwrap_or_default(),
            Err(error) => {
                warn!("discarding unreadable registration state: {error}");
                RegistrationWizard::default()
            }
        }
    }

    pub fn save_wizard(&self, wizard: &RegistrationWizard) -> Result<(), Error> {
        self.0.insert(WIZARD_KEY, wizard).map_err(write_failed)
    }

    pub fn clear_wizard(&self) {
        self.0.remove(WIZARD_KEY);
    }

    /// Drop every identity and any wizard state.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;

    fn viewer() -> AdminUser {
        AdminUser::new(
            AdminId::new("9").expect("id"),
            "Read Only",
            "viewer@migii.com",
            AdminRole::Viewer,
        )
    }

    #[rstest]
    #[actix_web::test]
    async fn round_trips_worker_id() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/set",
                    web::get().to(|session: SessionContext| async move {
                        session.persist_worker(&WorkerId::from_sequence(2))?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/get",
                    web::get().to(|session: SessionContext| async move {
                        let id = session.require_worker()?;
                        Ok::<_, Error>(HttpResponse::Ok().body(id.to_string()))
                    }),
                ),
        )
        .await;

        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        let cookie = session_cookie(&set_res);

        let get_res = test::call_service(
            &app,
            test::TestRequest::get().uri("/get").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(get_res.status(), StatusCode::OK);
        assert_eq!(test::read_body(get_res).await, "2");
    }

    #[rstest]
    #[actix_web::test]
    async fn missing_worker_is_unauthorised() {
        let app = test::init_service(App::new().wrap(test_session_middleware()).route(
            "/require",
            web::get().to(|session: SessionContext| async move {
                session.require_worker()?;
                Ok::<_, Error>(HttpResponse::Ok())
            }),
        ))
        .await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/require").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[actix_web::test]
    async fn viewer_admin_may_read_but_not_write() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/login",
                    web::get().to(|session: SessionContext| async move {
                        session.persist_admin(&viewer())?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/read",
                    web::get().to(|session: SessionContext| async move {
                        session.require_admin()?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/write",
                    web::get().to(|session: SessionContext| async move {
                        session.require_admin_writer()?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                ),
        )
        .await;

        let login =
            test::call_service(&app, test::TestRequest::get().uri("/login").to_request()).await;
        let cookie = session_cookie(&login);

        let read = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/read")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(read.status(), StatusCode::OK);

        let write = test::call_service(
            &app,
            test::TestRequest::get().uri("/write").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(write.status(), StatusCode::FORBIDDEN);
    }

    #[rstest]
    #[actix_web::test]
    async fn tampered_worker_id_is_unauthorised() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/set-invalid",
                    web::get().to(|session: Session| async move {
                        session
                            .insert(WORKER_ID_KEY, "   ")
                            .expect("set invalid worker id");
                        HttpResponse::Ok()
                    }),
                )
                .route(
                    "/require",
                    web::get().to(|session: SessionContext| async move {
                        session.require_worker()?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                ),
        )
        .await;

        let set_res = test::call_service(
            &app,
            test::TestRequest::get().uri("/set-invalid").to_request(),
        )
        .await;
        let cookie = session_cookie(&set_res);

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/require")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
