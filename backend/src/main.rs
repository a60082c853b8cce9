//! Backend entry-point: reads configuration and starts the HTTP server.

use actix_web::web;
use mockable::DefaultEnv;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt};

use booking_backend::config::{BuildMode, server_settings_from_env};
use booking_backend::inbound::http::health::HealthState;
use booking_backend::server::create_server;

/// Load settings from the environment and run the server.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let subscriber = fmt().with_env_filter(EnvFilter::from_default_env()).json();
    if let Err(e) = subscriber.try_init() {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        match server_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions()) {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "configuration rejected");
            return Err(std::io::Error::other(e));
        }
    };

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, settings)?.await
}
