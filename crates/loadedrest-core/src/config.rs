//! Configuration management for LoadedRest.
//!
//! All configuration is driven by environment variables.

use std::net::SocketAddr;

use crate::error::{LoadedRestError, LoadedRestResult};

/// Global configuration for LoadedRest.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadedRestConfig {
    /// Bind address for the server.
    pub gateway_listen: String,
    /// Log level.
    pub log_level: String,
    /// Whether the protocol is enabled. Disabled deployments answer 403.
    pub enabled: bool,
    /// Developer debug mode: error envelopes carry debug info.
    pub debug: bool,
}

impl Default for LoadedRestConfig {
    fn default() -> Self {
        Self {
            gateway_listen: "0.0.0.0:8080".to_owned(),
            log_level: "info".to_owned(),
            enabled: true,
            debug: false,
        }
    }
}

impl LoadedRestConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Unparseable boolean values are logged and leave the default in place.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(v) = lookup("GATEWAY_LISTEN") {
            config.gateway_listen = v;
        }
        if let Some(v) = lookup("LOG_LEVEL") {
            config.log_level = v;
        }
        if let Some(v) = lookup("LOADEDREST_ENABLED") {
            match parse_bool_flag(&v) {
                Some(flag) => config.enabled = flag,
                None => tracing::warn!(value = %v, "ignoring invalid LOADEDREST_ENABLED"),
            }
        }
        if let Some(v) = lookup("LOADEDREST_DEBUG") {
            match parse_bool_flag(&v) {
                Some(flag) => config.debug = flag,
                None => tracing::warn!(value = %v, "ignoring invalid LOADEDREST_DEBUG"),
            }
        }

        config
    }

    /// Parse the listen address.
    ///
    /// # Errors
    /// Returns [`LoadedRestError::Config`] if `gateway_listen` is not a socket address.
    pub fn listen_addr(&self) -> LoadedRestResult<SocketAddr> {
        self.gateway_listen.parse().map_err(|e| {
            LoadedRestError::Config(format!(
                "invalid bind address {}: {e}",
                self.gateway_listen
            ))
        })
    }
}

/// Parse a boolean environment flag.
///
/// Accepts `1`/`true` and `0`/`false`, case-insensitively.
#[must_use]
pub fn parse_bool_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}
