//! Application settings loaded via OrthoConfig.
//!
//! Values come from `MIGII_*` environment variables, an optional config file
//! and command-line flags, in increasing precedence.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::OtpPolicy;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_LATENCY_MIN_MS: u64 = 300;
const DEFAULT_LATENCY_MAX_MS: u64 = 1000;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {reason}")]
    InvalidBindAddr { value: String, reason: String },
}

/// Runtime settings for the Mock API server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MIGII")]
pub struct AppSettings {
    /// Keep registration and OTP dispatch lenient, masking backend failures.
    #[ortho_config(default = true)]
    pub demo_mode: bool,
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Lower bound of the simulated network delay.
    pub latency_min_ms: Option<u64>,
    /// Upper bound of the simulated network delay.
    pub latency_max_ms: Option<u64>,
}

impl AppSettings {
    /// Parsed listen address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse()
            .map_err(|error: std::net::AddrParseError| SettingsError::InvalidBindAddr {
                value: raw.to_owned(),
                reason: error.to_string(),
            })
    }

    /// Simulated latency bounds, defaulting to 300 ms to 1 s.
    pub fn latency_bounds(&self) -> (Duration, Duration) {
        (
            Duration::from_millis(self.latency_min_ms.unwrap_or(DEFAULT_LATENCY_MIN_MS)),
            Duration::from_millis(self.latency_max_ms.unwrap_or(DEFAULT_LATENCY_MAX_MS)),
        )
    }

    pub fn otp_policy(&self) -> OtpPolicy {
        OtpPolicy::from_demo_mode(self.demo_mode)
    }
}
