//! Service entry-point: loads settings, initialises logging, and runs the server
//! until Ctrl+C or SIGTERM.

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use users_api::api::health::HealthState;
use users_api::server::{ServerConfig, StartupError, create_server, serve_until, wait_for_signal};
use users_api::settings::AppSettings;

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

    let settings = AppSettings::load().map_err(StartupError::from)?;
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), ServerConfig::from(&settings))?;
    serve_until(server, health_state, wait_for_signal()).await
}
