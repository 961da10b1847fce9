//! Shared harness for HTTP integration tests.
//!
//! Assembles the real services over freshly seeded in-memory stores with no
//! simulated latency, and drives the app while carrying the session cookie.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test::{self as actix_test, TestRequest};
use actix_web::{App, web};
use migii::Trace;
use migii::domain::ports::{NoLatency, WorkerDirectory};
use migii::domain::{
    AdminAuthService, MockApiRuntime, OtpLoginService, OtpPolicy, RandomSuffix,
    RegistrationService, SupportDeskService, WorkerService,
};
use migii::inbound::http::configure;
use migii::inbound::http::session_config::{SESSION_COOKIE_NAME, SessionSettings};
use migii::inbound::http::state::HttpState;
use migii::outbound::admin_directory::SeededAdminDirectory;
use migii::outbound::memory::{InMemorySupportRequestRepository, InMemoryWorkerRepository};
use migii::outbound::sms::LoggingOtpSender;
use serde_json::{Value, json};
use tracing::field::{Field, Visit};
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// Handler state over the demo seed data.
pub fn seeded_state(policy: OtpPolicy) -> HttpState {
    let runtime = MockApiRuntime {
        latency: Arc::new(NoLatency),
        clock: Arc::new(mockable::DefaultClock),
    };
    let worker_store = Arc::new(InMemoryWorkerRepository::seeded().expect("seed workers"));
    let tickets = Arc::new(InMemorySupportRequestRepository::seeded().expect("seed tickets"));
    let sender = Arc::new(LoggingOtpSender);
    let workers: Arc<dyn WorkerDirectory> = Arc::new(WorkerService::new(
        worker_store.clone(),
        runtime.clone(),
        Arc::new(RandomSuffix),
    ));
    HttpState {
        workers: workers.clone(),
        support: Arc::new(SupportDeskService::new(tickets, runtime.clone())),
        worker_login: Arc::new(OtpLoginService::new(
            worker_store,
            sender.clone(),
            runtime.clone(),
            policy,
        )),
        admin_login: Arc::new(AdminAuthService::new(
            Arc::new(SeededAdminDirectory::demo().expect("admin accounts")),
            runtime.clone(),
        )),
        registration: Arc::new(RegistrationService::new(workers, sender, runtime, policy)),
    }
}

/// A browser-like client holding one session cookie.
pub struct Client<S> {
    app: S,
    cookie: Option<Cookie<'static>>,
}

/// Start the full API over seeded in-memory stores.
pub async fn client(
    policy: OtpPolicy,
) -> Client<impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>>
{
    let session = SessionSettings {
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
    };
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(seeded_state(policy)))
            .wrap(Trace)
            .service(
                web::scope("/api/v1")
                    .wrap(session.middleware())
                    .configure(configure),
            ),
    )
    .await;
    Client { app, cookie: None }
}

/// Status, `trace-id` header and decoded JSON body (`Null` when empty).
pub struct Reply {
    pub status: StatusCode,
    pub trace_id: Option<String>,
    pub body: Value,
}

impl<S> Client<S>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    pub async fn send(&mut self, request: TestRequest) -> Reply {
        let request = match &self.cookie {
            Some(cookie) => request.cookie(cookie.clone()),
            None => request,
        };
        let res = actix_test::call_service(&self.app, request.to_request()).await;
        if let Some(cookie) = res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        {
            self.cookie = Some(cookie.into_owned());
        }
        let status = res.status();
        let trace_id = res
            .headers()
            .get("trace-id")
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let bytes = actix_test::read_body(res).await;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        Reply {
            status,
            trace_id,
            body,
        }
    }

    pub async fn get(&mut self, uri: &str) -> Reply {
        self.send(TestRequest::get().uri(uri)).await
    }

    pub async fn post(&mut self, uri: &str, body: Value) -> Reply {
        self.send(TestRequest::post().uri(uri).set_json(body)).await
    }

    /// Sign in with one of the seeded admin accounts.
    pub async fn admin_login(&mut self, email: &str, password: &str) -> Reply {
        self.post(
            "/api/v1/auth/admin/login",
            json!({"email": email, "password": password}),
        )
        .await
    }
}

/// Counts events on the current thread whose message equals `expected`.
struct MessageCounter {
    expected: &'static str,
    count: Arc<AtomicUsize>,
}

struct MessageMatch {
    expected: &'static str,
    matched: bool,
}

impl Visit for MessageMatch {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" && format!("{value:?}") == self.expected {
            self.matched = true;
        }
    }
}

impl<S: Subscriber> Layer<S> for MessageCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageMatch {
            expected: self.expected,
            matched: false,
        };
        event.record(&mut visitor);
        if visitor.matched {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Record how often `message` is logged until the guard drops.
pub fn count_events(message: &'static str) -> (DefaultGuard, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(MessageCounter {
        expected: message,
        count: count.clone(),
    });
    (tracing::subscriber::set_default(subscriber), count)
}
