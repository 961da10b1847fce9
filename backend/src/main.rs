//! Backend entry-point: loads settings, wires the Mock API and serves REST
//! endpoints plus OpenAPI docs.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use migii::inbound::http::health::HealthState;
use migii::inbound::http::session_config::{BuildMode, session_settings_from_env};
use migii::settings::AppSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    let config = ServerConfig::from_settings(&settings, session).map_err(std::io::Error::other)?;
    info!(bind_addr = %config.bind_addr(), demo_mode = settings.demo_mode, "starting server");

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
