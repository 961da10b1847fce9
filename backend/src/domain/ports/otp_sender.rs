//! Port for delivering one-time codes to a phone.

use async_trait::async_trait;

use crate::domain::PhoneNumber;

use super::define_port_error;

define_port_error! {
    /// Errors raised by OTP delivery adapters.
    pub enum OtpSenderError {
        /// The gateway refused or could not be reached.
        Dispatch { message: String } => "otp dispatch failed: {message}",
    }
}

/// SMS gateway abstraction.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OtpSender: Send + Sync {
    /// Deliver `code` to `phone`.
    async fn send(&self, phone: &PhoneNumber, code: &str) -> Result<(), OtpSenderError>;
}

/// Sender that accepts every request and delivers nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureOtpSender;

#[async_trait]
impl OtpSender for FixtureOtpSender {
    async fn send(&self, _phone: &PhoneNumber, _code: &str) -> Result<(), OtpSenderError> {
        Ok(())
    }
}
