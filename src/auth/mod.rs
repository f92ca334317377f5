//! Authentication providers for Azure Key Vault access

pub mod provider;

pub use provider::{CredentialProvider, DefaultCredentialProvider};
