//! Blob storage operations for backup blobs

pub mod client;

pub use client::AzureBlobStore;

use async_trait::async_trait;

use crate::error::Result;

/// Trait for the blob container operations the service needs.
///
/// An implementation is bound to one container; backup and restore both run
/// against the container named in configuration.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Create the container if it does not already exist
    async fn ensure_container(&self) -> Result<()>;

    /// List the names of every blob in the container
    async fn list_blobs(&self) -> Result<Vec<String>>;

    /// Upload a blob, overwriting any existing blob of the same name
    async fn upload_blob(&self, name: &str, content: Vec<u8>) -> Result<()>;

    /// Download the full content of a blob
    async fn download_blob(&self, name: &str) -> Result<Vec<u8>>;
}
