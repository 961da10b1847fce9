//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use migii::domain::OtpPolicy;
use migii::inbound::http::session_config::SessionSettings;
use migii::settings::{AppSettings, SettingsError};

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) policy: OtpPolicy,
    pub(crate) latency: (Duration, Duration),
}

impl ServerConfig {
    /// Construct a server configuration with demo mode on and no latency.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        Self {
            session,
            bind_addr,
            policy: OtpPolicy::demo(),
            latency: (Duration::ZERO, Duration::ZERO),
        }
    }

    /// Apply loaded application settings.
    pub fn from_settings(
        settings: &AppSettings,
        session: SessionSettings,
    ) -> Result<Self, SettingsError> {
        let (min, max) = settings.latency_bounds();
        Ok(Self::new(session, settings.bind_addr()?)
            .with_policy(settings.otp_policy())
            .with_latency(min, max))
    }

    #[must_use]
    pub fn with_policy(mut self, policy: OtpPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Simulated Mock API delay range.
    #[must_use]
    pub fn with_latency(mut self, min: Duration, max: Duration) -> Self {
        self.latency = (min, max);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::{Key, SameSite};
    use rstest::rstest;

    fn session() -> SessionSettings {
        SessionSettings {
            key: Key::generate(),
            cookie_secure: false,
            same_site: SameSite::Lax,
        }
    }

    #[rstest]
    fn settings_flow_into_the_server_config() {
        let settings = AppSettings {
            demo_mode: false,
            bind_addr: Some("127.0.0.1:3000".into()),
            latency_min_ms: Some(10),
            latency_max_ms: Some(20),
        };
        let config = ServerConfig::from_settings(&settings, session()).expect("config");
        assert_eq!(config.bind_addr(), SocketAddr::from(([127, 0, 0, 1], 3000)));
        assert_eq!(config.policy, OtpPolicy::strict());
        assert_eq!(
            config.latency,
            (Duration::from_millis(10), Duration::from_millis(20))
        );
    }

    #[rstest]
    fn bad_bind_address_is_an_error() {
        let settings = AppSettings {
            demo_mode: true,
            bind_addr: Some("localhost".into()),
            latency_min_ms: None,
            latency_max_ms: None,
        };
        assert!(ServerConfig::from_settings(&settings, session()).is_err());
    }
}
