use std::time::Duration;

use reqwest::Client;

use crate::error::{Result, VaultsnapError};

/// Configuration for the HTTP client used against the Key Vault REST API
pub struct NetworkConfig {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            request_timeout: Duration::from_secs(120),
            user_agent: format!("vaultsnap/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Create a properly configured HTTP client with timeouts
pub fn create_http_client(config: &NetworkConfig) -> Result<Client> {
    Client::builder()
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout)
        .user_agent(&config.user_agent)
        .build()
        .map_err(|e| VaultsnapError::network(format!("Failed to create HTTP client: {e}")))
}

/// Classify a reqwest transport error into something an operator can act on
pub fn classify_network_error(error: &reqwest::Error, url: &str) -> VaultsnapError {
    if error.is_timeout() {
        return VaultsnapError::timeout(format!("Request to '{url}' timed out"));
    }

    if error.is_connect() {
        return VaultsnapError::network(format!(
            "Failed to connect to '{url}'. Check that the vault name is correct and the vault exists: {error}"
        ));
    }

    VaultsnapError::network(format!("Request to '{url}' failed: {error}"))
}
