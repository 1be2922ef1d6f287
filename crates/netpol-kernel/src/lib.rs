//! `netpol-kernel` — contracts and data model for the netpol control plane.
//!
//! This crate defines *what* the control plane manages and *which seams* the
//! runtime plugs into.  It performs no I/O:
//!
//! | Contract | Purpose |
//! |----------|---------|
//! | [`api`] | Typed API objects (tiers, policies, endpoints, nodes, …) |
//! | [`backend::Backend`] | Minimal key/value datastore consumed by the gateway |
//! | [`conversion::ResourceConverter`] | Per-kind API object to key/value translation |
//! | [`validation::Validate`] | Schema checks run before any datastore access |
//! | [`error`] | The shared error taxonomy |
//!
//! Concrete implementations (the resource gateway, converters, the in-memory
//! datastore and the HTTP surface) live in `netpol-gateway`.

pub mod api;
pub mod backend;
pub mod conversion;
pub mod error;
pub mod model;
pub mod validation;

#[cfg(feature = "config")]
pub mod config;

pub use api::{API_VERSION, Resource, ResourceKind, ResourceList};
pub use backend::{Backend, DatastoreResult};
pub use conversion::{MetadataOf, ResourceConverter};
pub use error::{
    ClientError, ClientResult, ConversionDirection, ConversionError, DatastoreError,
    ValidationError,
};
pub use model::{Key, KeyValue, ListSelector};
pub use validation::Validate;
