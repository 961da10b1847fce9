//! Driving port for OTP based worker login.

use async_trait::async_trait;

use crate::domain::{Error, OtpCode, PhoneNumber, WorkerId};

/// How an OTP request was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpDispatch {
    /// The sender accepted the code.
    Sent,
    /// The sender failed and demo mode carried on regardless.
    SentInDemoMode,
}

impl OtpDispatch {
    /// Notice shown to the user.
    pub fn notice(self) -> &'static str {
        match self {
            Self::Sent => "OTP sent successfully to your phone",
            Self::SentInDemoMode => "OTP sent successfully to your phone (demo mode)",
        }
    }
}

/// Domain use-case port for worker authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkerLoginService: Send + Sync {
    /// Send a login code to a registered phone; `None` when no worker uses it.
    async fn request_login_otp(&self, phone: &PhoneNumber) -> Result<Option<OtpDispatch>, Error>;

    /// The matching worker when `otp` is accepted and the phone is registered.
    async fn login_with_otp(
        &self,
        phone: &PhoneNumber,
        otp: &OtpCode,
    ) -> Result<Option<WorkerId>, Error>;
}
