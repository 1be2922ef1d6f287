//! netpol testing framework
//!
//! Provides a recording, fault-injecting datastore and ready-made objects
//! for exercising the resource gateway without a real datastore.

pub mod backend;
pub mod fixtures;

pub use backend::{BackendCall, MockBackend};
