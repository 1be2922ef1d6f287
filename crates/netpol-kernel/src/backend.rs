//! Datastore contract consumed by the resource gateway.
//!
//! The gateway never looks inside a [`KeyValue`]'s value and never assumes
//! anything about replication, consistency or watches.  It relies on exactly
//! the guarantees listed on each method.

use crate::error::DatastoreError;
use crate::model::{Key, KeyValue, ListSelector};
use async_trait::async_trait;

pub type DatastoreResult<T> = Result<T, DatastoreError>;

/// Minimal key/value datastore.
///
/// Implementations must be safe to share across concurrent requests; the
/// gateway holds a single handle and performs no locking of its own.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Store `kv` if its key is absent.
    ///
    /// Fails with [`DatastoreError::ResourceAlreadyExists`] otherwise, leaving
    /// the stored value untouched.
    async fn create(&self, kv: KeyValue) -> DatastoreResult<KeyValue>;

    /// Replace the value of an existing key.
    ///
    /// Fails with [`DatastoreError::ResourceDoesNotExist`] if the key is absent.
    async fn update(&self, kv: KeyValue) -> DatastoreResult<KeyValue>;

    /// Create or replace; never reports an identity conflict.
    async fn apply(&self, kv: KeyValue) -> DatastoreResult<KeyValue>;

    /// Remove a key.
    ///
    /// Fails with [`DatastoreError::ResourceDoesNotExist`] if the key is absent.
    async fn delete(&self, key: &Key) -> DatastoreResult<()>;

    /// Fetch the pair stored under `key`.
    async fn get(&self, key: &Key) -> DatastoreResult<KeyValue>;

    /// Enumerate every pair whose key matches `selector`, in the datastore's
    /// own enumeration order.  No match is an empty vector, not an error.
    async fn list(&self, selector: &ListSelector) -> DatastoreResult<Vec<KeyValue>>;

    /// Prepare the datastore for use.  Must be idempotent.
    async fn ensure_initialized(&self) -> DatastoreResult<()> {
        Ok(())
    }
}
