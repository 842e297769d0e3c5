//! Runtime settings loaded via OrthoConfig from CLI flags, `BALLOT_*`
//! environment variables and configuration files.

use std::net::{AddrParseError, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_STORE_TIMEOUT_SECS: u64 = 10;

/// Settings controlling the listener and the storage backend.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BALLOT")]
pub struct ServerSettings {
    /// Listen address, `host:port`.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without one the server keeps data in memory.
    pub database_url: Option<String>,
    /// Maximum pooled connections.
    pub pool_max_size: Option<u32>,
    /// Deadline for each repository operation, in seconds.
    pub store_timeout_secs: Option<u64>,
    /// Apply embedded migrations before serving. Defaults to on.
    pub run_migrations: Option<bool>,
}

impl ServerSettings {
    /// Parse the configured listen address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    /// Returns [`AddrParseError`] when the configured value is not a socket
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
    }

    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_secs(
            self.store_timeout_secs
                .unwrap_or(DEFAULT_STORE_TIMEOUT_SECS),
        )
    }

    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }
}
