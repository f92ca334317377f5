//! vaultsnap - Azure Key Vault backup and restore service
//!
//! Serves one POST endpoint that either backs up every secret in a Key
//! Vault to blob storage or restores every backup blob into a vault.

use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vaultsnap::auth::{CredentialProvider, DefaultCredentialProvider};
use vaultsnap::blob::{AzureBlobStore, BlobStore};
use vaultsnap::config::Config;
use vaultsnap::secret::{AzureSecretStore, SecretStore};
use vaultsnap::server::{self, AppState};
use vaultsnap::Result;

#[derive(Debug, Parser)]
#[command(name = "vaultsnap", version, about)]
struct Cli {
    /// Address to listen on
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() {
    init_logging();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("Error: {}", e);
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    info!("Starting vaultsnap");

    let config = Config::from_env()?;

    let auth_provider: Arc<dyn CredentialProvider> = Arc::new(DefaultCredentialProvider::new()?);
    let secrets: Arc<dyn SecretStore> = Arc::new(AzureSecretStore::new(auth_provider)?);
    let blobs: Arc<dyn BlobStore> = Arc::new(AzureBlobStore::from_connection_string(
        &config.storage_connection_string,
        &config.storage_container_name,
    )?);

    let state = AppState {
        secrets,
        blobs,
        function_key: config.function_key,
    };

    server::serve(&cli.host, cli.port, state).await
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "vaultsnap=info,tower_http=info".into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
