//! vaultsnap - Azure Key Vault backup and restore service
//!
//! An HTTP service that copies secrets between Azure Key Vault and
//! Azure Blob Storage: backup writes every secret in a vault to one
//! blob per secret, restore writes every blob in the container back
//! into a destination vault.

pub mod auth;
pub mod blob;
pub mod config;
pub mod error;
pub mod secret;
pub mod server;
pub mod transfer;
pub mod utils;

// Re-export commonly used types
pub use error::{Result, VaultsnapError};
