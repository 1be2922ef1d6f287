//! netpol gateway — entry point.
//!
//! Reads [`ServerSettings`] and the client config from the environment,
//! prepares the datastore and serves the HTTP API until shut down.

use anyhow::Context;
use netpol_gateway::client::Client;
use netpol_gateway::server::{self, ServerSettings};
use netpol_gateway::state::AppState;
use netpol_kernel::config::load_client_config;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("netpol_gateway=info,tower_http=info")
        }))
        .init();

    let settings = ServerSettings::from_env().context("invalid server settings")?;
    let client_config = load_client_config(settings.config.as_deref())
        .context("failed to load client config")?;
    info!(
        listen_addr = %settings.listen_addr,
        datastore_type = %client_config.spec.datastore_type,
        "netpol gateway configuration loaded"
    );

    let client = Client::from_config(&client_config).context("failed to create client")?;
    client
        .ensure_initialized()
        .await
        .context("failed to initialise datastore")?;

    server::serve(settings.listen_addr, Arc::new(AppState::new(client)))
        .await
        .context("server error")?;

    info!("netpol gateway stopped");
    Ok(())
}
