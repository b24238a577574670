//! Configuration management for the groupware client.
//!
//! This module handles loading and validating configuration from environment variables.

use crate::error::{ConfigError, ConfigResult};
use std::env;

/// Default resource identifier for the hosted contacts service.
pub const DEFAULT_CONTACTS_RESOURCE_ID: &str = "https://mail.groupware.example";

/// Default named capability for the user's cloud file store.
pub const DEFAULT_FILES_CAPABILITY: &str = "MyFiles";

/// Configuration for the groupware client.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the discovery/authentication service
    pub discovery_url: String,

    /// Client (application) identifier registered with the platform
    pub client_id: String,

    /// Resource identifier resolved for the contacts service
    pub contacts_resource_id: String,

    /// Named capability resolved for the file-storage service
    pub files_capability: String,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `GROUPWARE_DISCOVERY_URL`: Base URL of the discovery service
    /// - `GROUPWARE_CLIENT_ID`: Registered client identifier
    ///
    /// Optional environment variables:
    /// - `GROUPWARE_CONTACTS_RESOURCE_ID`: Contacts service resource id
    /// - `GROUPWARE_FILES_CAPABILITY`: Files capability name (default: "MyFiles")
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        // Try to load .env file if it exists (but don't fail if it doesn't)
        let _ = dotenvy::dotenv();

        let discovery_url = env::var("GROUPWARE_DISCOVERY_URL")
            .map_err(|_| ConfigError::MissingVar("GROUPWARE_DISCOVERY_URL".to_string()))?;

        let client_id = env::var("GROUPWARE_CLIENT_ID")
            .map_err(|_| ConfigError::MissingVar("GROUPWARE_CLIENT_ID".to_string()))?;

        if !discovery_url.starts_with("http://") && !discovery_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "GROUPWARE_DISCOVERY_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        if client_id.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "GROUPWARE_CLIENT_ID".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let contacts_resource_id = env::var("GROUPWARE_CONTACTS_RESOURCE_ID")
            .unwrap_or_else(|_| DEFAULT_CONTACTS_RESOURCE_ID.to_string());

        let files_capability = env::var("GROUPWARE_FILES_CAPABILITY")
            .unwrap_or_else(|_| DEFAULT_FILES_CAPABILITY.to_string());

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            discovery_url,
            client_id,
            contacts_resource_id,
            files_capability,
            request_timeout,
            log_level,
        })
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            discovery_url: String::new(),
            client_id: String::new(),
            contacts_resource_id: DEFAULT_CONTACTS_RESOURCE_ID.to_string(),
            files_capability: DEFAULT_FILES_CAPABILITY.to_string(),
            request_timeout: 10,
            log_level: "error".to_string(),
        }
    }
}
