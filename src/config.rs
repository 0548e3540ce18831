// Configuration management

use crate::core::errors::GatewayError;
use serde::{Deserialize, Serialize};
use std::env;

/// Application configuration loaded from environment variables
///
/// All configuration is validated on load with clear error messages. The
/// backend base URL is resolved here, once, and injected into the relay
/// client at construction time - never read ad hoc per call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Server configuration
    pub bind_address: String,
    pub port: u16,

    // Backend API configuration
    pub backend_url: String,
    pub backend_timeout_secs: u64,

    // Middleware configuration
    pub request_timeout_secs: u64,
    pub body_size_limit_bytes: usize,

    // Logging configuration
    pub log_level: String,
    pub log_format: String, // "json" or "text"
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Supports `.env` file loading in development (via dotenv crate).
    ///
    /// # Returns
    /// * `Result<Self, GatewayError>` - Config instance or validation error
    pub fn from_env() -> Result<Self, GatewayError> {
        // Load .env file if present (development)
        // Skip in test environment to avoid interfering with test environment variables
        #[cfg(not(test))]
        {
            dotenv::dotenv().ok(); // Ignore errors (file may not exist)
        }

        let config = Self {
            bind_address: Self::get_env_or_default("BIND_ADDRESS", "0.0.0.0"),
            port: Self::parse_port()?,
            backend_url: Self::get_required_env("BACKEND_URL")?,
            backend_timeout_secs: Self::parse_u64_or_default("BACKEND_TIMEOUT_SECS", 10)?,
            request_timeout_secs: Self::parse_u64_or_default("REQUEST_TIMEOUT_SECS", 30)?,
            body_size_limit_bytes: Self::parse_usize_or_default(
                "BODY_SIZE_LIMIT_BYTES",
                256 * 1024,
            )?,
            log_level: Self::get_env_or_default("LOG_LEVEL", "info"),
            log_format: Self::get_env_or_default("LOG_FORMAT", "text"),
        };

        // Post-load validation
        config.validate()?;

        Ok(config)
    }

    /// Get environment variable or return default value
    fn get_env_or_default(key: &str, default: &str) -> String {
        env::var(key).unwrap_or_else(|_| default.to_string())
    }

    /// Get required environment variable
    fn get_required_env(key: &str) -> Result<String, GatewayError> {
        match env::var(key) {
            Ok(value) if !value.is_empty() => Ok(value),
            _ => Err(GatewayError::ConfigurationError(format!(
                "{} not set",
                key
            ))),
        }
    }

    /// Parse port from PORT environment variable
    fn parse_port() -> Result<u16, GatewayError> {
        let port_str = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
        let port = port_str.parse::<u16>().map_err(|e| {
            GatewayError::ConfigurationError(format!(
                "Invalid PORT value '{}': {}",
                port_str, e
            ))
        })?;

        if port == 0 {
            return Err(GatewayError::ConfigurationError(
                "PORT must be between 1 and 65535".to_string(),
            ));
        }

        Ok(port)
    }

    /// Parse u64 from environment variable or return default
    fn parse_u64_or_default(key: &str, default: u64) -> Result<u64, GatewayError> {
        match env::var(key) {
            Ok(value) => {
                let parsed = value.parse::<u64>().map_err(|e| {
                    GatewayError::ConfigurationError(format!(
                        "Invalid {} value '{}': {}",
                        key, value, e
                    ))
                })?;

                if parsed == 0 {
                    return Err(GatewayError::ConfigurationError(format!(
                        "{} must be greater than 0",
                        key
                    )));
                }

                Ok(parsed)
            }
            _ => Ok(default),
        }
    }

    /// Parse usize from environment variable or return default
    fn parse_usize_or_default(key: &str, default: usize) -> Result<usize, GatewayError> {
        match env::var(key) {
            Ok(value) => {
                let parsed = value.parse::<usize>().map_err(|e| {
                    GatewayError::ConfigurationError(format!(
                        "Invalid {} value '{}': {}",
                        key, value, e
                    ))
                })?;

                if parsed == 0 {
                    return Err(GatewayError::ConfigurationError(format!(
                        "{} must be greater than 0",
                        key
                    )));
                }

                Ok(parsed)
            }
            _ => Ok(default),
        }
    }

    /// Validate all configuration values
    fn validate(&self) -> Result<(), GatewayError> {
        if self.port == 0 {
            return Err(GatewayError::ConfigurationError(format!(
                "Invalid PORT value '{}': must be between 1 and 65535",
                self.port
            )));
        }

        Self::validate_url(&self.backend_url, "Backend")?;
        Self::validate_log_level(&self.log_level)?;
        Self::validate_log_format(&self.log_format)?;

        Ok(())
    }

    /// Validate URL format
    fn validate_url(value: &str, description: &str) -> Result<(), GatewayError> {
        url::Url::parse(value).map_err(|e| {
            GatewayError::ConfigurationError(format!(
                "Invalid {} URL '{}': {}",
                description, value, e
            ))
        })?;
        Ok(())
    }

    /// Validate log level
    fn validate_log_level(level: &str) -> Result<(), GatewayError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&level.to_lowercase().as_str()) {
            return Err(GatewayError::ConfigurationError(format!(
                "Invalid LOG_LEVEL '{}': must be one of {}",
                level,
                valid_levels.join(", ")
            )));
        }
        Ok(())
    }

    /// Validate log format
    fn validate_log_format(format: &str) -> Result<(), GatewayError> {
        if format != "json" && format != "text" {
            return Err(GatewayError::ConfigurationError(format!(
                "Invalid LOG_FORMAT '{}': must be 'json' or 'text'",
                format
            )));
        }
        Ok(())
    }
}

impl Config {
    /// Create a test configuration for unit tests
    ///
    /// Bypasses environment variable loading for tests that don't need
    /// real configuration.
    pub fn test_config() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 3000,
            backend_url: "http://localhost:8000".to_string(),
            backend_timeout_secs: 10,
            request_timeout_secs: 30,
            body_size_limit_bytes: 256 * 1024,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}
