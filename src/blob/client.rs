//! Azure Blob Storage implementation
//!
//! Uses the azure_storage_blobs SDK with shared-key credentials parsed from
//! the storage connection string.

use async_trait::async_trait;
use azure_storage::ConnectionString;
use azure_storage_blobs::prelude::*;
use futures::TryStreamExt;

use crate::blob::BlobStore;
use crate::error::{Result, VaultsnapError};

/// Blob operations bound to a single container
pub struct AzureBlobStore {
    container_client: ContainerClient,
    container_name: String,
}

impl AzureBlobStore {
    /// Create a blob store from a storage connection string and container name
    pub fn from_connection_string(connection_string: &str, container_name: &str) -> Result<Self> {
        let parsed = ConnectionString::new(connection_string)
            .map_err(|e| VaultsnapError::config(format!("Invalid storage connection string: {e}")))?;

        let account = parsed.account_name.ok_or_else(|| {
            VaultsnapError::config("Storage connection string is missing AccountName")
        })?;

        let credentials = parsed.storage_credentials().map_err(|e| {
            VaultsnapError::config(format!(
                "Storage connection string has no usable credentials: {e}"
            ))
        })?;

        let service_client = BlobServiceClient::new(account, credentials);
        let container_client = service_client.container_client(container_name);

        Ok(Self {
            container_client,
            container_name: container_name.to_string(),
        })
    }

    /// Get the container name
    pub fn container_name(&self) -> &str {
        &self.container_name
    }
}

#[async_trait]
impl BlobStore for AzureBlobStore {
    async fn ensure_container(&self) -> Result<()> {
        match self.container_client.create().await {
            Ok(_) => Ok(()),
            Err(e) => {
                let error_msg = e.to_string();
                // 409 means another invocation created it first
                if error_msg.contains("ContainerAlreadyExists") || error_msg.contains("409") {
                    Ok(())
                } else {
                    Err(VaultsnapError::azure_api(format!(
                        "Failed to create container '{}': {e}",
                        self.container_name()
                    )))
                }
            }
        }
    }

    async fn list_blobs(&self) -> Result<Vec<String>> {
        let mut stream = self.container_client.list_blobs().into_stream();
        let mut names = Vec::new();

        while let Some(page) = stream
            .try_next()
            .await
            .map_err(|e| VaultsnapError::azure_api(format!("Failed to list blobs: {e}")))?
        {
            for blob_item in page.blobs.blobs() {
                names.push(blob_item.name.clone());
            }
        }

        Ok(names)
    }

    async fn upload_blob(&self, name: &str, content: Vec<u8>) -> Result<()> {
        let blob_client = self.container_client.blob_client(name);

        // Put Block Blob replaces any existing blob of the same name
        blob_client
            .put_block_blob(content)
            .content_type("text/plain")
            .await
            .map_err(|e| VaultsnapError::azure_api(format!("Failed to upload blob '{name}': {e}")))?;

        Ok(())
    }

    async fn download_blob(&self, name: &str) -> Result<Vec<u8>> {
        let blob_client = self.container_client.blob_client(name);

        let properties = blob_client.get_properties().await.map_err(|e| {
            VaultsnapError::azure_api(format!("Failed to get properties of blob '{name}': {e}"))
        })?;

        // get_content() fails with 416 Range Not Satisfiable for 0-byte blobs
        if properties.blob.properties.content_length == 0 {
            return Ok(Vec::new());
        }

        let content = blob_client.get_content().await.map_err(|e| {
            VaultsnapError::azure_api(format!("Failed to download blob '{name}': {e}"))
        })?;

        Ok(content)
    }
}
