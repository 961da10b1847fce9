//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on driving ports,
//! so they stay testable with mocks and no I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AdminLoginService, RegistrationFlow, SupportDesk, WorkerDirectory, WorkerLoginService,
};

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use migii::domain::ports::{FixtureOtpSender, FixtureWorkerRepository, NoLatency};
/// use migii::domain::{
///     AdminAuthService, FixedSuffix, MockApiRuntime, OtpLoginService, OtpPolicy,
///     RegistrationService, SupportDeskService, WorkerService,
/// };
/// use migii::inbound::http::state::HttpState;
/// use migii::outbound::admin_directory::SeededAdminDirectory;
/// use migii::outbound::memory::InMemorySupportRequestRepository;
///
/// let runtime = MockApiRuntime {
///     latency: Arc::new(NoLatency),
///     clock: Arc::new(mockable::DefaultClock),
/// };
/// let repo = Arc::new(FixtureWorkerRepository);
/// let workers = Arc::new(WorkerService::new(repo.clone(), runtime.clone(), Arc::new(FixedSuffix(12345))));
/// let state = HttpState {
///     workers: workers.clone(),
///     support: Arc::new(SupportDeskService::new(
///         Arc::new(InMemorySupportRequestRepository::empty()),
///         runtime.clone(),
///     )),
///     worker_login: Arc::new(OtpLoginService::new(
///         repo,
///         Arc::new(FixtureOtpSender),
///         runtime.clone(),
///         OtpPolicy::demo(),
///     )),
///     admin_login: Arc::new(AdminAuthService::new(
///         Arc::new(SeededAdminDirectory::demo().unwrap()),
///         runtime.clone(),
///     )),
///     registration: Arc::new(RegistrationService::new(
///         workers,
///         Arc::new(FixtureOtpSender),
///         runtime,
///         OtpPolicy::demo(),
///     )),
/// };
/// let _workers = state.workers.clone();
/// ```
#[derive(Clone)]
pub struct HttpState {
    pub workers: Arc<dyn WorkerDirectory>,
    pub support: Arc<dyn SupportDesk>,
    pub worker_login: Arc<dyn WorkerLoginService>,
    pub admin_login: Arc<dyn AdminLoginService>,
    pub registration: Arc<dyn RegistrationFlow>,
}
