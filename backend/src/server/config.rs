//! Settings loaded via OrthoConfig and the server configuration built from
//! them.

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use voting_backend::domain::ports::EligibilityChecker;
use voting_backend::outbound::persistence::{DbPool, PoolConfig};

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_DB_CONNECTION_TIMEOUT_SECS: u64 = 30;
const DEFAULT_ELIGIBILITY_TIMEOUT_SECS: u64 = 5;

/// Errors raised while interpreting settings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    /// The bind address is not a socket address.
    #[error("invalid bind address {value}")]
    BindAddr { value: String },
    /// Unknown eligibility mode.
    #[error("invalid eligibility mode {value}; expected random, always or http")]
    EligibilityMode { value: String },
    /// `http` mode without a usable base URL.
    #[error("eligibility mode http requires a valid eligibility_url: {message}")]
    EligibilityUrl { message: String },
}

/// How voter eligibility is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EligibilityMode {
    /// Structure check, then a fair coin flip.
    #[default]
    Random,
    /// Structure check only.
    Always,
    /// Remote identity service.
    Http,
}

impl FromStr for EligibilityMode {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(Self::Random),
            "always" => Ok(Self::Always),
            "http" => Ok(Self::Http),
            _ => Err(SettingsError::EligibilityMode {
                value: s.to_owned(),
            }),
        }
    }
}

/// Application settings read from CLI flags, `VOTING_*` environment
/// variables and configuration files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "VOTING")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; in-memory stores are used when absent.
    pub database_url: Option<String>,
    /// Maximum pooled connections.
    pub db_max_connections: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub db_connection_timeout_secs: Option<u64>,
    /// Apply pending migrations at startup (default true).
    pub run_migrations: Option<bool>,
    /// `random`, `always` or `http`.
    pub eligibility_mode: Option<String>,
    /// Base URL of the identity service for `http` mode.
    pub eligibility_url: Option<String>,
    /// Eligibility request timeout in seconds.
    pub eligibility_timeout_secs: Option<u64>,
}

impl AppSettings {
    /// Parsed bind address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|_| SettingsError::BindAddr {
            value: raw.to_owned(),
        })
    }

    /// Pool settings when a database URL is configured.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref()?;
        Some(
            PoolConfig::new(url)
                .with_max_size(
                    self.db_max_connections
                        .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS),
                )
                .with_connection_timeout(Duration::from_secs(
                    self.db_connection_timeout_secs
                        .unwrap_or(DEFAULT_DB_CONNECTION_TIMEOUT_SECS),
                )),
        )
    }

    /// Whether to run migrations before serving.
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }

    /// Parsed eligibility mode.
    pub fn eligibility_mode(&self) -> Result<EligibilityMode, SettingsError> {
        self.eligibility_mode
            .as_deref()
            .map_or(Ok(EligibilityMode::default()), str::parse)
    }

    /// Eligibility request timeout.
    pub fn eligibility_timeout(&self) -> Duration {
        Duration::from_secs(
            self.eligibility_timeout_secs
                .unwrap_or(DEFAULT_ELIGIBILITY_TIMEOUT_SECS),
        )
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) eligibility: Arc<dyn EligibilityChecker>,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Construct a server configuration.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, eligibility: Arc<dyn EligibilityChecker>) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            eligibility,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// Without one the server runs on in-memory stores.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[cfg(feature = "metrics")]
    /// Use `prometheus` instead of the default `voting` metrics middleware.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: PrometheusMetrics) -> Self {
        self.prometheus = Some(prometheus);
        self
    }
}
