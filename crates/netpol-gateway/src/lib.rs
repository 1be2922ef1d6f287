//! `netpol-gateway` — the netpol control plane runtime.
//!
//! This crate provides the concrete implementations of the contracts defined
//! in `netpol-kernel`:
//!
//! | Kernel contract | Implementation |
//! |----------------|----------------|
//! | [`Backend`](netpol_kernel::Backend) | [`backend::MemoryBackend`] |
//! | [`ResourceConverter`](netpol_kernel::ResourceConverter) | one per kind in [`converters`] |
//!
//! [`client::Client`] is the kind-agnostic resource gateway and
//! [`server::build_router`] exposes it over HTTP.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use netpol_gateway::client::Client;
//! use netpol_kernel::api::{Tier, TierMetadata, TierSpec};
//! use netpol_kernel::config::ClientConfig;
//!
//! # async fn run() -> Result<(), netpol_kernel::ClientError> {
//! let client = Client::from_config(&ClientConfig::default())?;
//! client.ensure_initialized().await?;
//!
//! let tier = Tier::new(TierMetadata::new("security"), TierSpec { order: Some(100.0) });
//! client.tiers().create(&tier).await?;
//! let tiers = client.tiers().list(&TierMetadata::default()).await?;
//! assert_eq!(tiers.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod client;
pub mod converters;
pub mod error;
pub mod handlers;
pub mod server;
pub mod state;

// Re-export the kernel for convenience.
pub use netpol_kernel as kernel;
