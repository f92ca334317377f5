//! Request handlers
//!
//! The backup/restore handler validates the request fully before touching
//! either store, then runs the transfer loop. Operational failures are
//! collapsed into one generic 500 body; the detail goes to the operator log
//! only.

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Json;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::server::AppState;
use crate::transfer;

/// Header carrying the function key, as the Azure Functions host names it
const FUNCTION_KEY_HEADER: &str = "x-functions-key";

/// Typed request body; absent fields deserialize to `None`
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BackupRestoreRequest {
    pub action: Option<String>,
    pub vault_name: Option<String>,
    pub destination_vault_name: Option<String>,
}

#[derive(Debug, PartialEq)]
enum Action {
    Backup { vault_name: String },
    Restore { destination_vault_name: String },
}

/// Validate the request body, producing the exact client-error message for
/// each rejection. No store is touched until this passes.
fn validate(request: &BackupRestoreRequest) -> Result<Action, &'static str> {
    let action = match request.action.as_deref() {
        Some(a) if !a.is_empty() => a,
        _ => return Err("Please provide 'action'."),
    };

    let action_lower = action.to_lowercase();

    if action_lower == "backup" {
        match request.vault_name.as_deref() {
            Some(v) if !v.is_empty() => Ok(Action::Backup {
                vault_name: v.to_string(),
            }),
            _ => Err("Please provide 'vaultName' for backup."),
        }
    } else if action_lower == "restore" {
        match request.destination_vault_name.as_deref() {
            Some(v) if !v.is_empty() => Ok(Action::Restore {
                destination_vault_name: v.to_string(),
            }),
            _ => Err("Please provide 'Target Key Vault Name' for restore."),
        }
    } else {
        Err("Invalid action. Please use 'backup' or 'restore'.")
    }
}

fn authorized(state: &AppState, headers: &HeaderMap, query: &HashMap<String, String>) -> bool {
    let Some(expected) = state.function_key.as_deref() else {
        return true;
    };

    let header_key = headers
        .get(FUNCTION_KEY_HEADER)
        .and_then(|v| v.to_str().ok());
    let query_key = query.get("code").map(|s| s.as_str());

    header_key == Some(expected) || query_key == Some(expected)
}

/// Handle one backup/restore invocation
pub async fn backup_restore(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    info!("backup-restore triggered");

    if !authorized(&state, &headers, &query) {
        return (StatusCode::UNAUTHORIZED, String::new());
    }

    let request: BackupRestoreRequest = if body.is_empty() {
        BackupRestoreRequest::default()
    } else {
        match serde_json::from_slice(&body) {
            Ok(request) => request,
            Err(_) => {
                return (StatusCode::BAD_REQUEST, "Invalid request body.".to_string());
            }
        }
    };

    let action = match validate(&request) {
        Ok(action) => action,
        Err(message) => return (StatusCode::BAD_REQUEST, message.to_string()),
    };

    if let Err(e) = state.blobs.ensure_container().await {
        error!(error = %e, "failed to prepare backup container");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            "An error occurred".to_string(),
        );
    }

    let outcome = match &action {
        Action::Backup { vault_name } => {
            transfer::backup(state.secrets.as_ref(), state.blobs.as_ref(), vault_name)
                .await
                .map(|_| "Backup of all secrets completed successfully.")
        }
        Action::Restore {
            destination_vault_name,
        } => transfer::restore(
            state.secrets.as_ref(),
            state.blobs.as_ref(),
            destination_vault_name,
        )
        .await
        .map(|_| "Restore from backup to vault completed successfully."),
    };

    match outcome {
        Ok(message) => (StatusCode::OK, message.to_string()),
        Err(e) => {
            error!(error = %e, "An error occurred");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An error occurred".to_string(),
            )
        }
    }
}

/// Liveness probe
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
