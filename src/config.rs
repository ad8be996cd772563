//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! Configuration is loaded once by the binary at startup, after `.env` has been read.

use std::env;
use std::str::FromStr;

use crate::constants::{DEFAULT_LOG_FORMAT, DEFAULT_RUST_LOG};

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub log: LogConfig,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Fallback filter directive when `RUST_LOG` is not usable
    pub rust_log: String,
    pub format: LogFormat,
}

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidValue("LOG_FORMAT".to_string())),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            log: LogConfig::from_lookup(&lookup)?,
        })
    }
}

impl LogConfig {
    fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_RUST_LOG.to_string()),
            format: lookup("LOG_FORMAT")
                .unwrap_or_else(|| DEFAULT_LOG_FORMAT.to_string())
                .parse()?,
        })
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}
