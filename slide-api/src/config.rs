use std::net::SocketAddr;

use crate::error::ConfigError;

/// Environment variable holding the listen address.
pub const BIND_ADDR_VAR: &str = "SLIDE_BIND_ADDR";

/// Listen address used when `SLIDE_BIND_ADDR` is unset.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Server configuration, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
        }
    }
}

impl ApiConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = lookup(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = value
            .trim()
            .parse()
            .map_err(|source| ConfigError::InvalidAddr {
                var: BIND_ADDR_VAR,
                value: value.clone(),
                source,
            })?;
        Ok(ApiConfig { bind_addr })
    }
}
