//! Configuration for the demo binary.
//!
//! Loads configuration from environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use todo_widget_runtime::StoreConfig;
use tracing_subscriber::EnvFilter;

/// Log filter directive (default: `info`)
pub const LOG_VAR: &str = "TODO_LOG";
/// Graceful shutdown timeout in seconds (default: 5)
pub const SHUTDOWN_TIMEOUT_VAR: &str = "TODO_SHUTDOWN_TIMEOUT_SECS";
/// Capacity of the store's action broadcast (default: 16)
pub const BROADCAST_CAPACITY_VAR: &str = "TODO_BROADCAST_CAPACITY";
/// Simulated latency of the in-memory creation service (default: 0)
pub const API_LATENCY_VAR: &str = "TODO_API_LATENCY_MS";

/// Longest accepted shutdown timeout, in seconds
pub const MAX_SHUTDOWN_TIMEOUT_SECS: u64 = 3600;
/// Longest accepted simulated latency, in milliseconds
pub const MAX_API_LATENCY_MS: u64 = 60_000;

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but does not parse
    #[error("Invalid value for {var}: {value:?} ({reason})")]
    InvalidValue {
        /// Variable name
        var: &'static str,
        /// Raw value
        value: String,
        /// Parser message
        reason: String,
    },

    /// A variable parses but is out of range
    #[error("Configuration validation failed: {0}")]
    Validation(String),
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// `tracing` filter directive
    pub log_filter: String,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout_secs: u64,
    /// Capacity of the store's action broadcast
    pub broadcast_capacity: usize,
    /// Simulated creation latency in milliseconds
    pub api_latency_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            shutdown_timeout_secs: 5,
            broadcast_capacity: 16,
            api_latency_ms: 0,
        }
    }
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to something invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults for unset variables
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to something invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            log_filter: lookup(LOG_VAR).unwrap_or(defaults.log_filter),
            shutdown_timeout_secs: parse(&lookup, SHUTDOWN_TIMEOUT_VAR, defaults.shutdown_timeout_secs)?,
            broadcast_capacity: parse(&lookup, BROADCAST_CAPACITY_VAR, defaults.broadcast_capacity)?,
            api_latency_ms: parse(&lookup, API_LATENCY_VAR, defaults.api_latency_ms)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if a value is out of range, or
    /// [`ConfigError::InvalidValue`] if the log filter does not parse.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.broadcast_capacity == 0 {
            return Err(ConfigError::Validation(format!("{BROADCAST_CAPACITY_VAR} must be at least 1")));
        }
        if self.shutdown_timeout_secs > MAX_SHUTDOWN_TIMEOUT_SECS {
            return Err(ConfigError::Validation(format!(
                "{SHUTDOWN_TIMEOUT_VAR} must be at most {MAX_SHUTDOWN_TIMEOUT_SECS}"
            )));
        }
        if self.api_latency_ms > MAX_API_LATENCY_MS {
            return Err(ConfigError::Validation(format!("{API_LATENCY_VAR} must be at most {MAX_API_LATENCY_MS}")));
        }
        self.log_filter()?;
        Ok(())
    }

    /// Parsed `tracing` filter
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the directive does not parse.
    pub fn log_filter(&self) -> Result<EnvFilter, ConfigError> {
        EnvFilter::try_new(&self.log_filter).map_err(|error| ConfigError::InvalidValue {
            var: LOG_VAR,
            value: self.log_filter.clone(),
            reason: error.to_string(),
        })
    }

    /// Graceful shutdown timeout
    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }

    /// Simulated creation latency
    #[must_use]
    pub const fn api_latency(&self) -> Duration {
        Duration::from_millis(self.api_latency_ms)
    }

    /// Store configuration derived from this configuration
    #[must_use]
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::default()
            .with_broadcast_capacity(self.broadcast_capacity)
            .with_shutdown_timeout(self.shutdown_timeout())
    }
}

fn parse<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|error: T::Err| ConfigError::InvalidValue {
            var,
            reason: error.to_string(),
            value,
        }),
    }
}
