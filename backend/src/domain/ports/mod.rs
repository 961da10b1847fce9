//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`AdminDirectory`], [`OtpSender`],
//! [`NetworkLatency`]) describe what the domain needs from adapters; driving
//! ports ([`WorkerDirectory`], [`SupportDesk`], [`WorkerLoginService`],
//! [`AdminLoginService`], [`RegistrationFlow`]) are what inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod admin_directory;
mod admin_login;
mod network_latency;
mod otp_sender;
mod registration_flow;
mod support_desk;
mod support_request_repository;
mod worker_directory;
mod worker_login;
mod worker_repository;

#[cfg(test)]
pub use admin_directory::MockAdminDirectory;
pub use admin_directory::{AdminDirectory, AdminDirectoryError};
#[cfg(test)]
pub use admin_login::MockAdminLoginService;
pub use admin_login::AdminLoginService;
pub use network_latency::{ApiOperation, NetworkLatency, NoLatency};
#[cfg(test)]
pub use otp_sender::MockOtpSender;
pub use otp_sender::{FixtureOtpSender, OtpSender, OtpSenderError};
#[cfg(test)]
pub use registration_flow::MockRegistrationFlow;
pub use registration_flow::{RegistrationFlow, RegistrationOutcome};
#[cfg(test)]
pub use support_desk::MockSupportDesk;
pub use support_desk::SupportDesk;
#[cfg(test)]
pub use support_request_repository::MockSupportRequestRepository;
pub use support_request_repository::{SupportRequestRepository, SupportRequestRepositoryError};
#[cfg(test)]
pub use worker_directory::MockWorkerDirectory;
pub use worker_directory::WorkerDirectory;
#[cfg(test)]
pub use worker_login::MockWorkerLoginService;
pub use worker_login::{OtpDispatch, WorkerLoginService};
#[cfg(test)]
pub use worker_repository::MockWorkerRepository;
pub use worker_repository::{FixtureWorkerRepository, WorkerRepository, WorkerRepositoryError};
