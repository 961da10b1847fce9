//! Worker OTP login and admin login services.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    AdminDirectory, AdminDirectoryError, AdminLoginService, ApiOperation, OtpDispatch, OtpSender,
    WorkerLoginService, WorkerRepository,
};
use crate::domain::worker_service::map_worker_repository_error;
use crate::domain::{
    AdminCredentials, AdminUser, DEMO_OTP, Error, MockApiRuntime, OtpCode, OtpPolicy,
    PhoneNumber, WorkerId,
};

/// Send the demo code through `sender`, applying the demo-mode fallback.
pub(crate) async fn dispatch_otp(
    sender: &dyn OtpSender,
    runtime: &MockApiRuntime,
    policy: OtpPolicy,
    phone: &PhoneNumber,
) -> Result<OtpDispatch, Error> {
    runtime.latency.pause(ApiOperation::SendOtp).await;
    match sender.send(phone, DEMO_OTP).await {
        Ok(()) => Ok(OtpDispatch::Sent),
        Err(error) if policy.demo_mode() => {
            warn!(%error, "otp dispatch failed; continuing in demo mode");
            Ok(OtpDispatch::SentInDemoMode)
        }
        Err(error) => Err(Error::service_unavailable(error.to_string())),
    }
}

/// OTP login over the worker store.
#[derive(Clone)]
pub struct OtpLoginService<R> {
    workers: Arc<R>,
    sender: Arc<dyn OtpSender>,
    runtime: MockApiRuntime,
    policy: OtpPolicy,
}

impl<R> OtpLoginService<R> {
    pub fn new(
        workers: Arc<R>,
        sender: Arc<dyn OtpSender>,
        runtime: MockApiRuntime,
        policy: OtpPolicy,
    ) -> Self {
        Self {
            workers,
            sender,
            runtime,
            policy,
        }
    }
}

#[async_trait]
impl<R> WorkerLoginService for OtpLoginService<R>
where
    R: WorkerRepository,
{
    async fn request_login_otp(&self, phone: &PhoneNumber) -> Result<Option<OtpDispatch>, Error> {
        self.runtime
            .latency
            .pause(ApiOperation::VerifyWorkerExists)
            .await;
        let known = self
            .workers
            .find_by_phone(phone)
            .await
            .map_err(map_worker_repository_error)?
            .is_some();
        if !known {
            return Ok(None);
        }
        dispatch_otp(self.sender.as_ref(), &self.runtime, self.policy, phone)
            .await
            .map(Some)
    }

    async fn login_with_otp(
        &self,
        phone: &PhoneNumber,
        otp: &OtpCode,
    ) -> Result<Option<WorkerId>, Error> {
        self.runtime.latency.pause(ApiOperation::LoginWithOtp).await;
        if !self.policy.accepts_login_code(otp) {
            return Ok(None);
        }
        let worker = self
            .workers
            .find_by_phone(phone)
            .await
            .map_err(map_worker_repository_error)?;
        if let Some(worker) = &worker {
            info!(worker_id = %worker.id(), "worker logged in");
        }
        Ok(worker.map(|worker| worker.id().clone()))
    }
}

/// Admin login over an [`AdminDirectory`].
#[derive(Clone)]
pub struct AdminAuthService<D> {
    directory: Arc<D>,
    runtime: MockApiRuntime,
}

impl<D> AdminAuthService<D> {
    pub fn new(directory: Arc<D>, runtime: MockApiRuntime) -> Self {
        Self { directory, runtime }
    }
}

#[async_trait]
impl<D> AdminLoginService for AdminAuthService<D>
where
    D: AdminDirectory,
{
    async fn admin_login(
        &self,
        credentials: &AdminCredentials,
    ) -> Result<Option<AdminUser>, Error> {
        self.runtime.latency.pause(ApiOperation::AdminLogin).await;
        let admin = self
            .directory
            .find_by_credentials(credentials)
            .await
            .map_err(|error| match error {
                AdminDirectoryError::Connection { message } => {
                    Error::service_unavailable(format!("admin directory unavailable: {message}"))
                }
            })?;
        match &admin {
            Some(user) => info!(admin_id = %user.id(), role = ?user.role(), "admin logged in"),
            None => warn!("admin login rejected"),
        }
        Ok(admin)
    }
}
