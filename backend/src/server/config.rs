//! Server settings loaded via OrthoConfig.

use std::net::SocketAddr;
use std::num::NonZeroUsize;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::DEFAULT_FANOUT_LIMIT;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address {value:?}: {message}")]
    BindAddr {
        /// Raw configured value.
        value: String,
        /// Parser message.
        message: String,
    },
    /// `feed_fanout_limit` was zero.
    #[error("feed fan-out limit must be at least 1")]
    ZeroFanout,
    /// `db_max_connections` was zero.
    #[error("database pool must allow at least one connection")]
    ZeroPoolSize,
}

/// Process configuration, read from CLI flags, `CHIRP_*` variables and
/// config files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CHIRP")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. In-memory adapters are used when absent.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Concurrent followee lookups per feed request.
    pub feed_fanout_limit: Option<usize>,
}

impl ServerSettings {
    /// Parse the configured bind address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    /// Database URL, if one is configured and non-blank.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Pool size, defaulting to 10.
    pub fn db_max_connections(&self) -> Result<u32, SettingsError> {
        match self.db_max_connections {
            Some(0) => Err(SettingsError::ZeroPoolSize),
            Some(size) => Ok(size),
            None => Ok(DEFAULT_DB_MAX_CONNECTIONS),
        }
    }

    /// Fan-out bound for feed assembly.
    pub fn feed_fanout_limit(&self) -> Result<NonZeroUsize, SettingsError> {
        match self.feed_fanout_limit {
            Some(limit) => NonZeroUsize::new(limit).ok_or(SettingsError::ZeroFanout),
            None => Ok(DEFAULT_FANOUT_LIMIT),
        }
    }
}
