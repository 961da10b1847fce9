//! Registration wizard backend actions.
//!
//! Wizard transitions that need no backend live on
//! [`RegistrationWizard`](crate::domain::RegistrationWizard); this service
//! covers OTP dispatch and final submission, including the demo-mode
//! fallbacks.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::auth_service::dispatch_otp;
use crate::domain::ports::{
    OtpDispatch, OtpSender, RegistrationFlow, RegistrationOutcome, WorkerDirectory,
};
use crate::domain::{Error, ErrorCode, MockApiRuntime, OtpCode, OtpPolicy, RegistrationWizard};

/// Service implementing [`RegistrationFlow`].
#[derive(Clone)]
pub struct RegistrationService {
    workers: Arc<dyn WorkerDirectory>,
    sender: Arc<dyn OtpSender>,
    runtime: MockApiRuntime,
    policy: OtpPolicy,
}

impl RegistrationService {
    pub fn new(
        workers: Arc<dyn WorkerDirectory>,
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
impl RegistrationFlow for RegistrationService {
    async fn send_otp(&self, wizard: &mut RegistrationWizard) -> Result<OtpDispatch, Error> {
        let phone = wizard.otp_target()?;
        let dispatch = dispatch_otp(self.sender.as_ref(), &self.runtime, self.policy, &phone).await?;
        wizard.mark_otp_sent();
        Ok(dispatch)
    }

    async fn submit(
        &self,
        wizard: &RegistrationWizard,
        otp: Option<OtpCode>,
    ) -> Result<RegistrationOutcome, Error> {
        let registration = wizard.prepare_submission(otp.as_ref(), self.policy)?;
        match self.workers.create_worker(registration).await {
            Ok(worker) => Ok(RegistrationOutcome::Registered { worker }),
            Err(error)
                if self.policy.demo_mode() && error.code() != ErrorCode::InvalidRequest =>
            {
                warn!(%error, "worker creation failed; accepting registration in demo mode");
                Ok(RegistrationOutcome::AcceptedInDemoMode)
            }
            Err(error) => Err(error),
        }
    }
}
