//! Connection configuration.
//!
//! Loaded from JSON, optionally overridden from the environment, then
//! validated. Validation checks only for a non-empty host and a positive
//! timeout.

use serde::{Deserialize, Serialize};

use crate::duration::DurationMs;
use crate::error::ConfigError;

/// Environment variable overriding [`ConnectionConfig::host`].
pub const HOST_ENV: &str = "REMCALL_HOST";
/// Environment variable overriding [`ConnectionConfig::timeout`], in milliseconds.
pub const TIMEOUT_ENV: &str = "REMCALL_TIMEOUT_MS";
/// Environment variable overriding [`ConnectionConfig::offline_mode`].
pub const OFFLINE_ENV: &str = "REMCALL_OFFLINE";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Where and how to connect.
///
/// # Example
///
/// ```
/// use remcall_types::ConnectionConfig;
///
/// let config = ConnectionConfig::from_json_str(r#"{"host": "10.0.0.7", "timeout": 3000}"#)
///     .unwrap();
/// assert_eq!(config.host, "10.0.0.7");
/// assert!(!config.offline_mode);
/// config.validate().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Host name or IP address of the controller.
    pub host: String,
    /// Connection timeout.
    pub timeout: DurationMs,
    /// Run functions without a live connection, for testing without hardware.
    pub offline_mode: bool,
}

impl ConnectionConfig {
    /// Config for `host` with default timeout, online.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    /// Override the timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: DurationMs) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enable or disable offline mode.
    #[must_use]
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline_mode = offline;
        self
    }

    /// Parse from a JSON document. Missing fields take defaults.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_env_with(|var| std::env::var(var).ok())
    }

    /// Apply overrides read through `lookup`.
    pub fn apply_env_with(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(host) = lookup(HOST_ENV) {
            self.host = host;
        }
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let ms: u64 = raw.trim().parse().map_err(|_| ConfigError::Env {
                var: TIMEOUT_ENV.into(),
                reason: format!("not a number of milliseconds: {raw:?}"),
            })?;
            self.timeout = DurationMs::from_millis(ms);
        }
        if let Some(raw) = lookup(OFFLINE_ENV) {
            self.offline_mode = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" | "" => false,
                _ => {
                    return Err(ConfigError::Env {
                        var: OFFLINE_ENV.into(),
                        reason: format!("not a boolean: {raw:?}"),
                    });
                }
            };
        }
        Ok(self)
    }

    /// Check the host is non-empty and the timeout positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::EmptyHost);
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            timeout: DurationMs::from_millis(DEFAULT_TIMEOUT_MS),
            offline_mode: false,
        }
    }
}
