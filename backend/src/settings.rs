//! Runtime settings loaded via OrthoConfig.
//!
//! Values come from `HOTEL_*` environment variables, an optional
//! configuration file and command-line flags, in increasing precedence.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_DATABASE_PATH: &str = "hotel_system.db";
const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 5000));
const DEFAULT_POOL_MAX_SIZE: u32 = 4;

/// Configuration for the hotel operations server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "HOTEL")]
pub struct HotelSettings {
    /// SQLite database file; created on first start.
    pub database_path: Option<String>,
    /// Socket address the HTTP listener binds to.
    pub bind_addr: Option<SocketAddr>,
    /// Maximum pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Insert the starter rooms when the room table is empty.
    #[ortho_config(default = true)]
    pub seed_rooms: bool,
    /// File holding the session signing key material.
    pub session_key_file: Option<PathBuf>,
    /// Permit a generated session key in release builds.
    #[ortho_config(default = false)]
    pub allow_ephemeral_session_key: bool,
    /// Mark the session cookie `Secure`.
    #[ortho_config(default = false)]
    pub cookie_secure: bool,
}

impl HotelSettings {
    pub fn database_path(&self) -> &str {
        self.database_path.as_deref().unwrap_or(DEFAULT_DATABASE_PATH)
    }

    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or(DEFAULT_BIND_ADDR)
    }

    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    pub fn session_key_file(&self) -> Option<&Path> {
        self.session_key_file.as_deref()
    }
}
