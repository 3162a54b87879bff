//! Runtime configuration for the server binary.

use std::net::SocketAddr;
use std::time::Duration;

use crate::sites::{DEFAULT_SOURCE_URL, SiteClientConfig};

const ENV_SOURCE_URL: &str = "CHARGER_MAP_SOURCE_URL";
const ENV_BIND_ADDR: &str = "CHARGER_MAP_BIND_ADDR";
const ENV_REFRESH_SECS: &str = "CHARGER_MAP_REFRESH_SECS";
const ENV_TIMEOUT_SECS: &str = "CHARGER_MAP_TIMEOUT_SECS";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value for {name}: {value:?} ({reason})")]
pub struct ConfigError {
    pub name: &'static str,
    pub value: String,
    pub reason: String,
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// URL of the site directory.
    pub source_url: String,

    /// Address the HTTP server listens on.
    pub bind_addr: SocketAddr,

    /// Period between refreshes. `None` refreshes once at startup only.
    pub refresh_interval: Option<Duration>,

    /// Upstream request timeout in seconds.
    pub timeout_secs: u64,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let source_url = lookup(ENV_SOURCE_URL)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SOURCE_URL.to_string());

        let bind_raw = lookup(ENV_BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.parse().map_err(|e: std::net::AddrParseError| ConfigError {
            name: ENV_BIND_ADDR,
            value: bind_raw.clone(),
            reason: e.to_string(),
        })?;

        let refresh_interval = match parse_secs(&lookup, ENV_REFRESH_SECS)? {
            None | Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
        };

        let timeout_secs = match parse_secs(&lookup, ENV_TIMEOUT_SECS)? {
            Some(0) => {
                return Err(ConfigError {
                    name: ENV_TIMEOUT_SECS,
                    value: "0".to_string(),
                    reason: "must be positive".to_string(),
                });
            }
            Some(secs) => secs,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            source_url,
            bind_addr,
            refresh_interval,
            timeout_secs,
        })
    }

    /// Client configuration for the site directory.
    pub fn client_config(&self) -> SiteClientConfig {
        SiteClientConfig::new(&self.source_url).with_timeout(self.timeout_secs)
    }
}

fn parse_secs(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<u64>, ConfigError> {
    let Some(raw) = lookup(name) else {
        return Ok(None);
    };
    raw.trim().parse().map(Some).map_err(|e: std::num::ParseIntError| ConfigError {
        name,
        value: raw.clone(),
        reason: e.to_string(),
    })
}
