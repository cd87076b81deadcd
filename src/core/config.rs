//! Configuration management for the resource invoker.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (optionally via a `.env` file) or
//! defaults.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::error::{Error, Result};

/// Default bound on nested resource-parameter sub-requests.
pub const DEFAULT_MAX_SUB_REQUEST_DEPTH: usize = 16;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application identification.
    pub app: AppConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Resolution and invocation settings.
    pub resources: ResourcesConfig,
}

/// Application identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// The name of the application, used in log output.
    pub name: String,

    /// The version of the application.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Configuration for resolving and invoking resources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourcesConfig {
    /// Maximum nesting of sub-requests issued by resource-bound parameters.
    pub max_sub_request_depth: usize,

    /// Whether derived parameter specs are memoized per (type, verb).
    /// Disabling this re-derives them on every call.
    pub cache_metadata: bool,
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self {
            max_sub_request_depth: DEFAULT_MAX_SUB_REQUEST_DEPTH,
            cache_metadata: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app: AppConfig {
                name: "resource-invoker".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            resources: ResourcesConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `RESOURCE_`.
    /// For example: `RESOURCE_APP_NAME`, `RESOURCE_LOG_LEVEL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("RESOURCE_APP_NAME") {
            config.app.name = name;
        }

        if let Ok(level) = std::env::var("RESOURCE_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(timestamps) = std::env::var("RESOURCE_LOG_TIMESTAMPS") {
            match timestamps.parse() {
                Ok(value) => config.logging.with_timestamps = value,
                Err(_) => warn!("Ignoring invalid RESOURCE_LOG_TIMESTAMPS: {}", timestamps),
            }
        }

        if let Ok(depth) = std::env::var("RESOURCE_MAX_SUB_REQUEST_DEPTH") {
            match depth.parse() {
                Ok(value) => {
                    config.resources.max_sub_request_depth = value;
                    info!("Sub-request depth limited to {}", value);
                }
                Err(_) => warn!("Ignoring invalid RESOURCE_MAX_SUB_REQUEST_DEPTH: {}", depth),
            }
        }

        if let Ok(cache) = std::env::var("RESOURCE_CACHE_METADATA") {
            match cache.parse() {
                Ok(value) => config.resources.cache_metadata = value,
                Err(_) => warn!("Ignoring invalid RESOURCE_CACHE_METADATA: {}", cache),
            }
        }

        config
    }

    /// Reject settings the client cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.resources.max_sub_request_depth == 0 {
            return Err(Error::config(
                "max_sub_request_depth must be at least 1",
            ));
        }
        if self.app.name.trim().is_empty() {
            return Err(Error::config("app name must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(
            config.resources.max_sub_request_depth,
            DEFAULT_MAX_SUB_REQUEST_DEPTH
        );
        assert!(config.resources.cache_metadata);
    }

    #[test]
    fn test_resources_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("RESOURCE_MAX_SUB_REQUEST_DEPTH", "3");
            std::env::set_var("RESOURCE_CACHE_METADATA", "false");
        }
        let config = Config::from_env();
        assert_eq!(config.resources.max_sub_request_depth, 3);
        assert!(!config.resources.cache_metadata);
        unsafe {
            std::env::remove_var("RESOURCE_MAX_SUB_REQUEST_DEPTH");
            std::env::remove_var("RESOURCE_CACHE_METADATA");
        }
    }

    #[test]
    fn test_invalid_env_value_keeps_default() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("RESOURCE_MAX_SUB_REQUEST_DEPTH", "deep");
        }
        let config = Config::from_env();
        assert_eq!(
            config.resources.max_sub_request_depth,
            DEFAULT_MAX_SUB_REQUEST_DEPTH
        );
        unsafe {
            std::env::remove_var("RESOURCE_MAX_SUB_REQUEST_DEPTH");
        }
    }

    #[test]
    fn test_validate() {
        assert!(Config::default().validate().is_ok());

        let mut config = Config::default();
        config.resources.max_sub_request_depth = 0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }
}
