//! Axum-based HTTP server.
//!
//! # Endpoints
//!
//! | Path | Methods | Kind |
//! |------|---------|------|
//! | `/health` | `GET` | liveness check |
//! | `/tier` | `GET PUT POST DELETE` | tiers |
//! | `/policy`, `/policies` | `GET PUT POST DELETE` | policies |
//! | `/profile` | `GET PUT POST DELETE` | profiles |
//! | `/hostEndpoint` | `GET PUT POST DELETE` | host endpoints |
//! | `/ipPool` | `GET PUT POST DELETE` | IP pools |
//! | `/bgpPeer` | `GET PUT POST DELETE` | BGP peers |
//! | `/config` | `GET PUT POST DELETE` | configuration values |
//! | `/nodes` | `GET` | nodes |
//! | `/workloadEndpoints` | `GET` | workload endpoints |

use crate::converters::{
    BgpPeerConverter, ConfigConverter, HostEndpointConverter, IpPoolConverter, NodeConverter,
    PolicyConverter, ProfileConverter, TierConverter, WorkloadEndpointConverter,
};
use crate::handlers::{health_router, list_router, resource_router};
use crate::state::AppState;
use axum::Router;
use netpol_kernel::config::{ConfigResult, from_env_source};
use serde::Deserialize;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;

// ─────────────────────────────────────────────────────────────────────────────
// ServerSettings
// ─────────────────────────────────────────────────────────────────────────────

/// Process-level settings, read from `NETPOL_*` environment variables.
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | `NETPOL_LISTEN_ADDR` | `0.0.0.0:8080` | Socket address to bind. |
/// | `NETPOL_CONFIG` | *(none)* | Client config file, else the environment. |
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub listen_addr: SocketAddr,
    pub config: Option<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            config: None,
        }
    }
}

impl ServerSettings {
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_vars(None)
    }

    /// As [`from_env`](Self::from_env) with an explicit variable set.
    pub fn from_vars(vars: Option<HashMap<String, String>>) -> ConfigResult<Self> {
        from_env_source("NETPOL", vars)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Server
// ─────────────────────────────────────────────────────────────────────────────

/// Build the full application router over `state`.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(health_router())
        .merge(resource_router::<TierConverter>("/tier"))
        .merge(resource_router::<PolicyConverter>("/policy"))
        .merge(resource_router::<PolicyConverter>("/policies"))
        .merge(resource_router::<ProfileConverter>("/profile"))
        .merge(resource_router::<HostEndpointConverter>("/hostEndpoint"))
        .merge(resource_router::<IpPoolConverter>("/ipPool"))
        .merge(resource_router::<BgpPeerConverter>("/bgpPeer"))
        .merge(resource_router::<ConfigConverter>("/config"))
        .merge(list_router::<NodeConverter>("/nodes"))
        .merge(list_router::<WorkloadEndpointConverter>("/workloadEndpoints"))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C or SIGTERM.
pub async fn serve(addr: SocketAddr, state: Arc<AppState>) -> std::io::Result<()> {
    let app = build_router(state);
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "netpol gateway listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received, draining connections");
}
