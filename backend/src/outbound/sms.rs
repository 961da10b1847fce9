//! Simulated OTP delivery.
//!
//! No SMS gateway is contacted; the code is written to the log so a demo user
//! or operator can read it.

use async_trait::async_trait;
use tracing::info;

use crate::domain::PhoneNumber;
use crate::domain::ports::{OtpSender, OtpSenderError};

/// [`OtpSender`] that logs the code at `info`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingOtpSender;

#[async_trait]
impl OtpSender for LoggingOtpSender {
    async fn send(&self, phone: &PhoneNumber, code: &str) -> Result<(), OtpSenderError> {
        info!(phone = %phone, otp = code, "OTP dispatched");
        Ok(())
    }
}
