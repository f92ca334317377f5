//! In-memory fakes for the secret and blob stores.
//!
//! Both fakes count every call so tests can assert that rejected requests
//! never touch a store, and both support error injection to simulate
//! mid-loop failures.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use vaultsnap::blob::BlobStore;
use vaultsnap::secret::SecretStore;
use vaultsnap::{Result, VaultsnapError};

/// In-memory secret store covering multiple vaults
#[derive(Default)]
pub struct MemorySecretStore {
    vaults: RwLock<BTreeMap<String, BTreeMap<String, String>>>,
    calls: AtomicUsize,
    /// Secret name whose value fetch should fail
    fail_get_for: RwLock<Option<String>>,
}

impl MemorySecretStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn set(&self, vault: &str, name: &str, value: &str) {
        let mut vaults = self.vaults.write().await;
        vaults
            .entry(vault.to_string())
            .or_default()
            .insert(name.to_string(), value.to_string());
    }

    pub async fn secrets_in(&self, vault: &str) -> BTreeMap<String, String> {
        self.vaults
            .read()
            .await
            .get(vault)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn fail_get_for(&self, name: &str) {
        *self.fail_get_for.write().await = Some(name.to_string());
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SecretStore for MemorySecretStore {
    async fn list_secret_names(&self, vault_name: &str) -> Result<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .vaults
            .read()
            .await
            .get(vault_name)
            .map(|secrets| secrets.keys().cloned().collect())
            .unwrap_or_default())
    }

    async fn get_secret_value(&self, vault_name: &str, secret_name: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_get_for.read().await.as_deref() == Some(secret_name) {
            return Err(VaultsnapError::azure_api(format!(
                "injected failure for '{secret_name}'"
            )));
        }
        self.vaults
            .read()
            .await
            .get(vault_name)
            .and_then(|secrets| secrets.get(secret_name))
            .cloned()
            .ok_or_else(|| VaultsnapError::secret_not_found(secret_name))
    }

    async fn set_secret(&self, vault_name: &str, secret_name: &str, value: &str) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.set(vault_name, secret_name, value).await;
        Ok(())
    }
}

/// In-memory blob container
#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<BTreeMap<String, Vec<u8>>>,
    calls: AtomicUsize,
    /// Blob name whose download should fail
    fail_download_for: RwLock<Option<String>>,
}

impl MemoryBlobStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn put(&self, name: &str, content: &[u8]) {
        self.blobs
            .write()
            .await
            .insert(name.to_string(), content.to_vec());
    }

    pub async fn contents(&self) -> BTreeMap<String, Vec<u8>> {
        self.blobs.read().await.clone()
    }

    pub async fn fail_download_for(&self, name: &str) {
        *self.fail_download_for.write().await = Some(name.to_string());
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn ensure_container(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn list_blobs(&self) -> Result<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.blobs.read().await.keys().cloned().collect())
    }

    async fn upload_blob(&self, name: &str, content: Vec<u8>) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.blobs.write().await.insert(name.to_string(), content);
        Ok(())
    }

    async fn download_blob(&self, name: &str) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_download_for.read().await.as_deref() == Some(name) {
            return Err(VaultsnapError::azure_api(format!(
                "injected failure for '{name}'"
            )));
        }
        self.blobs
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| VaultsnapError::azure_api(format!("blob '{name}' not found")))
    }
}
