//! Backup and restore transfer loops
//!
//! Both operations process records sequentially in enumeration order and
//! abort on the first failure. Records written before a failure stay
//! written; there is no rollback and no checkpointing.

use tracing::{debug, info};

use crate::blob::BlobStore;
use crate::error::{Result, VaultsnapError};
use crate::secret::SecretStore;

/// Suffix appended to a secret name to form its backup blob name
pub const BACKUP_SUFFIX: &str = ".backup";

/// Blob name for a secret's backup
pub fn backup_blob_name(secret_name: &str) -> String {
    format!("{secret_name}{BACKUP_SUFFIX}")
}

/// Derive the secret name from a backup blob name by stripping the trailing
/// extension (and any path prefix). Blobs without an extension restore under
/// their full name.
pub fn secret_name_from_blob(blob_name: &str) -> String {
    let file_name = blob_name.rsplit('/').next().unwrap_or(blob_name);
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => file_name.to_string(),
    }
}

/// Back up every secret in `vault_name` to the blob container, one blob per
/// secret. Existing blobs of the same name are overwritten. Returns the
/// number of secrets backed up.
pub async fn backup(
    secrets: &dyn SecretStore,
    blobs: &dyn BlobStore,
    vault_name: &str,
) -> Result<usize> {
    let names = secrets.list_secret_names(vault_name).await?;
    info!(vault = vault_name, count = names.len(), "starting backup");

    for name in &names {
        let value = secrets.get_secret_value(vault_name, name).await?;
        blobs
            .upload_blob(&backup_blob_name(name), value.into_bytes())
            .await?;
        debug!(secret = name.as_str(), "backed up secret");
    }

    info!(vault = vault_name, count = names.len(), "backup complete");
    Ok(names.len())
}

/// Restore every blob in the container into `destination_vault` as a secret.
/// Every blob is treated as a backup record; existing secrets gain a new
/// version. Returns the number of secrets restored.
pub async fn restore(
    secrets: &dyn SecretStore,
    blobs: &dyn BlobStore,
    destination_vault: &str,
) -> Result<usize> {
    let blob_names = blobs.list_blobs().await?;
    info!(
        vault = destination_vault,
        count = blob_names.len(),
        "starting restore"
    );

    for blob_name in &blob_names {
        let content = blobs.download_blob(blob_name).await?;
        let value = String::from_utf8(content).map_err(|e| {
            VaultsnapError::serialization(format!("Blob '{blob_name}' is not valid UTF-8: {e}"))
        })?;
        let secret_name = secret_name_from_blob(blob_name);
        secrets
            .set_secret(destination_vault, &secret_name, &value)
            .await?;
        debug!(secret = secret_name.as_str(), "restored secret");
    }

    info!(
        vault = destination_vault,
        count = blob_names.len(),
        "restore complete"
    );
    Ok(blob_names.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backup_blob_name() {
        assert_eq!(backup_blob_name("db-pass"), "db-pass.backup");
        assert_eq!(backup_blob_name("api-key"), "api-key.backup");
    }

    #[test]
    fn test_secret_name_from_blob_strips_suffix() {
        assert_eq!(secret_name_from_blob("db-pass.backup"), "db-pass");
        assert_eq!(secret_name_from_blob("api-key.backup"), "api-key");
    }

    #[test]
    fn test_secret_name_from_blob_strips_any_extension() {
        // Every blob in the container is treated as a backup record,
        // whatever its extension
        assert_eq!(secret_name_from_blob("stray.txt"), "stray");
        assert_eq!(secret_name_from_blob("no-extension"), "no-extension");
    }

    #[test]
    fn test_secret_name_from_blob_keeps_inner_dots() {
        assert_eq!(secret_name_from_blob("app.db.pass.backup"), "app.db.pass");
    }

    #[test]
    fn test_secret_name_from_blob_strips_path_prefix() {
        assert_eq!(secret_name_from_blob("nested/db-pass.backup"), "db-pass");
    }

    #[test]
    fn test_round_trip_of_name() {
        for name in ["db-pass", "api-key", "app.db.pass"] {
            assert_eq!(secret_name_from_blob(&backup_blob_name(name)), name);
        }
    }
}
