//! Credential provider trait and implementations
//!
//! The service never handles raw credentials itself; tokens come from the
//! ambient identity of the host (managed identity, workload identity, az
//! login, environment variables) via `DefaultAzureCredential`. The trait
//! exists so tests can substitute a fake identity without contacting real
//! infrastructure.

use std::sync::Arc;

use async_trait::async_trait;
use azure_core::auth::{AccessToken, TokenCredential};
use azure_identity::{DefaultAzureCredential, TokenCredentialOptions};

use crate::error::{Result, VaultsnapError};

/// Scope requested for Key Vault data-plane tokens
pub const KEY_VAULT_SCOPE: &str = "https://vault.azure.net/.default";

/// Trait for acquiring Azure access tokens
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Get an access token for the specified scopes
    async fn get_token(&self, scopes: &[&str]) -> Result<AccessToken>;
}

/// Credential provider backed by `DefaultAzureCredential`
pub struct DefaultCredentialProvider {
    credential: Arc<DefaultAzureCredential>,
}

impl DefaultCredentialProvider {
    pub fn new() -> Result<Self> {
        let credential = Arc::new(
            DefaultAzureCredential::create(TokenCredentialOptions::default()).map_err(|e| {
                VaultsnapError::authentication(format!(
                    "Failed to create DefaultAzureCredential: {e}"
                ))
            })?,
        );

        Ok(Self { credential })
    }
}

#[async_trait]
impl CredentialProvider for DefaultCredentialProvider {
    async fn get_token(&self, scopes: &[&str]) -> Result<AccessToken> {
        let token = self
            .credential
            .get_token(scopes)
            .await
            .map_err(|e| VaultsnapError::authentication(format!("Failed to get token: {e}")))?;

        Ok(token)
    }
}
