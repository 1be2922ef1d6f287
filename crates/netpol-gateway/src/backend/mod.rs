//! Datastore implementations of the kernel [`Backend`] contract.

mod memory;

pub use memory::MemoryBackend;

use netpol_kernel::Backend;
use netpol_kernel::config::{ClientConfig, DatastoreType};
use std::sync::Arc;

/// Build the datastore named by `config.spec.datastoreType`.
pub fn connect(config: &ClientConfig) -> Arc<dyn Backend> {
    match config.spec.datastore_type {
        DatastoreType::Memory => {
            tracing::info!(
                datastore_type = %config.spec.datastore_type,
                "Using in-memory datastore"
            );
            Arc::new(MemoryBackend::new())
        }
    }
}
