//! Key Vault secret operations

pub mod client;

pub use client::AzureSecretStore;

use async_trait::async_trait;

use crate::error::Result;

/// Trait for the secret store operations the service needs.
///
/// Backup only reads the latest value of each secret; restore upserts,
/// which creates a new version when the secret already exists.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// List the names of every enumerable secret in the vault.
    /// No filtering of disabled or expired secrets.
    async fn list_secret_names(&self, vault_name: &str) -> Result<Vec<String>>;

    /// Get the latest value of a secret
    async fn get_secret_value(&self, vault_name: &str, secret_name: &str) -> Result<String>;

    /// Set a secret value, creating a new version if it already exists
    async fn set_secret(&self, vault_name: &str, secret_name: &str, value: &str) -> Result<()>;
}
