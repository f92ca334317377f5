//! Configuration settings management
//!
//! Settings are sourced from the environment, matching the variables the
//! function app exposes to its workers.

use crate::error::{Result, VaultsnapError};

/// Runtime configuration for the service
#[derive(Debug, Clone)]
pub struct Config {
    /// Azure Storage connection string for the backup container
    pub storage_connection_string: String,
    /// Name of the blob container that holds backup blobs
    pub storage_container_name: String,
    /// Function-level authorization key; when unset the endpoint is open
    pub function_key: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let storage_connection_string = require_env("STORAGE_CONNECTION_STRING")?;
        let storage_container_name = require_env("STORAGE_CONTAINER_NAME")?;
        let function_key = optional_env("FUNCTION_KEY");

        let config = Self {
            storage_connection_string,
            storage_container_name,
            function_key,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.storage_connection_string.is_empty() {
            return Err(VaultsnapError::config("STORAGE_CONNECTION_STRING is required"));
        }

        if self.storage_container_name.is_empty() {
            return Err(VaultsnapError::config("STORAGE_CONTAINER_NAME is required"));
        }

        Ok(())
    }
}

fn require_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(VaultsnapError::config(format!(
            "{name} environment variable is not set"
        ))),
    }
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
}
