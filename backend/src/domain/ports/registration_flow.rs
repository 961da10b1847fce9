//! Driving port for the steps of the registration wizard that reach the
//! backend: sending the verification code and completing registration.

use async_trait::async_trait;

use crate::domain::{Error, OtpCode, RegistrationWizard, Worker};

use super::OtpDispatch;

/// Result of a completed registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// The worker was stored and received a unique ID.
    Registered { worker: Worker },
    /// Storing failed but demo mode reported success anyway.
    AcceptedInDemoMode,
}

/// Domain use-case port for wizard actions with side effects.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationFlow: Send + Sync {
    /// Send the verification code to the wizard's phone and enable OTP entry.
    async fn send_otp(&self, wizard: &mut RegistrationWizard) -> Result<OtpDispatch, Error>;

    /// Verify the code, validate the form and create the worker.
    async fn submit(
        &self,
        wizard: &RegistrationWizard,
        otp: Option<OtpCode>,
    ) -> Result<RegistrationOutcome, Error>;
}
