//! Builders wiring the in-memory adapters and Mock API services into
//! [`HttpState`].

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use migii::domain::ports::WorkerDirectory;
use migii::domain::{
    AdminAuthService, MockApiRuntime, OtpLoginService, RandomSuffix, RegistrationService,
    SupportDeskService, WorkerService,
};
use migii::inbound::http::state::HttpState;
use migii::outbound::admin_directory::SeededAdminDirectory;
use migii::outbound::latency::TokioNetworkLatency;
use migii::outbound::memory::{InMemorySupportRequestRepository, InMemoryWorkerRepository};
use migii::outbound::sms::LoggingOtpSender;

use super::ServerConfig;

fn startup_error(error: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("failed to build application state: {error}"))
}

/// Build handler state over freshly seeded in-memory stores.
///
/// # Errors
/// Returns [`std::io::Error`] when the seed data or admin accounts fail to
/// decode.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let (min, max) = config.latency;
    let runtime = MockApiRuntime {
        latency: Arc::new(TokioNetworkLatency::new(min, max)),
        clock: Arc::new(mockable::DefaultClock),
    };
    let worker_store = Arc::new(InMemoryWorkerRepository::seeded().map_err(startup_error)?);
    let ticket_store =
        Arc::new(InMemorySupportRequestRepository::seeded().map_err(startup_error)?);
    let admins = Arc::new(SeededAdminDirectory::demo().map_err(startup_error)?);
    let sender = Arc::new(LoggingOtpSender);

    let workers: Arc<dyn WorkerDirectory> = Arc::new(WorkerService::new(
        worker_store.clone(),
        runtime.clone(),
        Arc::new(RandomSuffix),
    ));
    let state = HttpState {
        workers: workers.clone(),
        support: Arc::new(SupportDeskService::new(ticket_store, runtime.clone())),
        worker_login: Arc::new(OtpLoginService::new(
            worker_store,
            sender.clone(),
            runtime.clone(),
            config.policy,
        )),
        admin_login: Arc::new(AdminAuthService::new(admins, runtime.clone())),
        registration: Arc::new(RegistrationService::new(
            workers,
            sender,
            runtime,
            config.policy,
        )),
    };
    info!(
        demo_mode = config.policy.demo_mode(),
        latency = ?config.latency,
        "mock api state ready"
    );
    Ok(web::Data::new(state))
}
