//! Backend entry-point: prepares the database and serves the hotel views.

mod server;

use std::path::Path;

use actix_web::cookie::Key;
use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use hotel_ops::inbound::http::health::HealthState;
use hotel_ops::settings::HotelSettings;
use hotel_ops::startup::prepare_database;
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

    let settings = HotelSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;

    let key = load_session_key(&settings)?;
    let pool = prepare_database(&settings).await?;

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(key, settings.bind_addr(), pool)
        .with_cookie_secure(settings.cookie_secure);
    info!(bind_addr = %config.bind_addr(), database = settings.database_path(), "starting server");
    let server = create_server(health_state, config)?;
    server.await
}

fn load_session_key(settings: &HotelSettings) -> std::io::Result<Key> {
    let allow_ephemeral = cfg!(debug_assertions) || settings.allow_ephemeral_session_key;
    match settings.session_key_file() {
        Some(path) => read_key(path).or_else(|e| {
            if allow_ephemeral {
                warn!(path = %path.display(), error = %e, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(e)
            }
        }),
        None if allow_ephemeral => {
            warn!("no session key file configured; using temporary session key (dev only)");
            Ok(Key::generate())
        }
        None => Err(std::io::Error::other(
            "session key file is required; set HOTEL_SESSION_KEY_FILE",
        )),
    }
}

fn read_key(path: &Path) -> std::io::Result<Key> {
    let bytes = std::fs::read(path).map_err(|e| {
        std::io::Error::other(format!(
            "failed to read session key at {}: {e}",
            path.display()
        ))
    })?;
    // `Key::derive_from` panics on short input.
    if bytes.len() < 32 {
        return Err(std::io::Error::other(format!(
            "session key at {} must hold at least 32 bytes",
            path.display()
        )));
    }
    Ok(Key::derive_from(&bytes))
}
