//! Chirp entry-point: loads settings, selects adapters and serves the REST API.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), forbid(clippy::expect_used))]

use std::env;
use std::io;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use chirp::inbound::http::health::HealthState;
use chirp::server::{ServerSettings, create_server, http_state_from_settings};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(env::args_os())
        .map_err(|err| io::Error::other(format!("load settings: {err}")))?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let http_state = http_state_from_settings(&settings)
        .await
        .map_err(|err| io::Error::other(format!("prepare adapters: {err}")))?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, http_state, bind_addr)?;
    info!(%bind_addr, "chirp listening");
    server.await
}
