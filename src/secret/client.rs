//! Azure Key Vault secret store implementation
//!
//! Talks to the Key Vault data-plane REST API directly over reqwest with a
//! bearer token from the credential provider. List enumeration follows the
//! `nextLink` continuation so the full vault is visited regardless of page
//! size.

use std::sync::Arc;

use async_trait::async_trait;

use crate::auth::provider::KEY_VAULT_SCOPE;
use crate::auth::CredentialProvider;
use crate::error::{Result, VaultsnapError};
use crate::secret::SecretStore;
use crate::utils::network::{classify_network_error, create_http_client, NetworkConfig};

const API_VERSION: &str = "7.4";

/// Key Vault secret operations over the REST API
pub struct AzureSecretStore {
    auth_provider: Arc<dyn CredentialProvider>,
    client: reqwest::Client,
}

impl AzureSecretStore {
    pub fn new(auth_provider: Arc<dyn CredentialProvider>) -> Result<Self> {
        let client = create_http_client(&NetworkConfig::default())?;
        Ok(Self {
            auth_provider,
            client,
        })
    }

    fn vault_url(vault_name: &str) -> String {
        format!("https://{vault_name}.vault.azure.net")
    }

    async fn bearer_token(&self) -> Result<String> {
        let token = self.auth_provider.get_token(&[KEY_VAULT_SCOPE]).await?;
        Ok(token.token.secret().to_string())
    }

    /// Extract the secret name from a secret identifier URL
    fn name_from_id(id: &str) -> String {
        id.trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or(id)
            .to_string()
    }
}

#[async_trait]
impl SecretStore for AzureSecretStore {
    async fn list_secret_names(&self, vault_name: &str) -> Result<Vec<String>> {
        let token = self.bearer_token().await?;
        let mut names = Vec::new();
        let mut next_url = Some(format!(
            "{}/secrets?api-version={}",
            Self::vault_url(vault_name),
            API_VERSION
        ));

        while let Some(url) = next_url.take() {
            let response = self
                .client
                .get(&url)
                .bearer_auth(&token)
                .send()
                .await
                .map_err(|e| classify_network_error(&e, &url))?;

            if !response.status().is_success() {
                let status = response.status();
                let error_text = response.text().await.unwrap_or_default();
                return Err(VaultsnapError::azure_api(format!(
                    "Failed to list secrets in vault '{vault_name}': HTTP {status} - {error_text}"
                )));
            }

            let json: serde_json::Value = response.json().await.map_err(|e| {
                VaultsnapError::serialization(format!("Failed to parse list response: {e}"))
            })?;

            if let Some(values) = json.get("value").and_then(|v| v.as_array()) {
                for secret in values {
                    if let Some(id) = secret.get("id").and_then(|v| v.as_str()) {
                        names.push(Self::name_from_id(id));
                    }
                }
            }

            next_url = json
                .get("nextLink")
                .and_then(|v| v.as_str())
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string());
        }

        Ok(names)
    }

    async fn get_secret_value(&self, vault_name: &str, secret_name: &str) -> Result<String> {
        let token = self.bearer_token().await?;
        let secret_url = format!(
            "{}/secrets/{}?api-version={}",
            Self::vault_url(vault_name),
            secret_name,
            API_VERSION
        );

        let response = self
            .client
            .get(&secret_url)
            .bearer_auth(&token)
            .send()
            .await
            .map_err(|e| classify_network_error(&e, &secret_url))?;

        if !response.status().is_success() {
            let status = response.status();
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(VaultsnapError::secret_not_found(secret_name));
            }
            let error_text = response.text().await.unwrap_or_default();
            return Err(VaultsnapError::azure_api(format!(
                "Failed to get secret '{secret_name}': HTTP {status} - {error_text}"
            )));
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            VaultsnapError::serialization(format!("Failed to parse secret response: {e}"))
        })?;

        json.get("value")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| {
                VaultsnapError::azure_api(format!(
                    "Secret '{secret_name}' response did not contain a value"
                ))
            })
    }

    async fn set_secret(&self, vault_name: &str, secret_name: &str, value: &str) -> Result<()> {
        let token = self.bearer_token().await?;
        let secret_url = format!(
            "{}/secrets/{}?api-version={}",
            Self::vault_url(vault_name),
            secret_name,
            API_VERSION
        );

        let body = serde_json::json!({ "value": value });

        let response = self
            .client
            .put(&secret_url)
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await
            .map_err(|e| classify_network_error(&e, &secret_url))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(VaultsnapError::azure_api(format!(
                "Failed to set secret '{secret_name}': HTTP {status} - {error_text}"
            )));
        }

        Ok(())
    }
}
