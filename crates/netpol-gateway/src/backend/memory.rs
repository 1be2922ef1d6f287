//! In-memory [`Backend`].

use async_trait::async_trait;
use netpol_kernel::{Backend, DatastoreError, DatastoreResult, Key, KeyValue, ListSelector};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

#[derive(Debug, Clone)]
struct Stored {
    value: Option<Vec<u8>>,
    revision: u64,
}

#[derive(Debug, Default)]
struct Inner {
    entries: BTreeMap<Key, Stored>,
    revision: u64,
}

impl Inner {
    fn next_revision(&mut self) -> u64 {
        self.revision += 1;
        self.revision
    }
}

/// [`Backend`] backed by an ordered map.
///
/// Every write bumps a store-wide revision.  Enumeration follows key order.
/// Suitable for tests and single-process deployments.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    inner: RwLock<Inner>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().entries.is_empty()
    }

    /// Store `kv` without any existence check, as a datastore populated by
    /// another writer would.
    pub fn insert_raw(&self, kv: KeyValue) -> KeyValue {
        let mut inner = self.inner.write();
        let revision = inner.next_revision();
        inner.entries.insert(
            kv.key.clone(),
            Stored {
                value: kv.value.clone(),
                revision,
            },
        );
        kv.with_revision(revision)
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn create(&self, kv: KeyValue) -> DatastoreResult<KeyValue> {
        let mut inner = self.inner.write();
        let revision = inner.revision + 1;
        match inner.entries.entry(kv.key.clone()) {
            Entry::Occupied(_) => Err(DatastoreError::ResourceAlreadyExists(kv.key)),
            Entry::Vacant(slot) => {
                slot.insert(Stored {
                    value: kv.value.clone(),
                    revision,
                });
                inner.revision = revision;
                tracing::debug!(key = %kv.key, revision, "created");
                Ok(kv.with_revision(revision))
            }
        }
    }

    async fn update(&self, kv: KeyValue) -> DatastoreResult<KeyValue> {
        let mut inner = self.inner.write();
        let revision = inner.revision + 1;
        match inner.entries.get_mut(&kv.key) {
            None => Err(DatastoreError::ResourceDoesNotExist(kv.key)),
            Some(stored) => {
                stored.value = kv.value.clone();
                stored.revision = revision;
                inner.revision = revision;
                tracing::debug!(key = %kv.key, revision, "updated");
                Ok(kv.with_revision(revision))
            }
        }
    }

    async fn apply(&self, kv: KeyValue) -> DatastoreResult<KeyValue> {
        let kv = self.insert_raw(kv);
        tracing::debug!(key = %kv.key, revision = ?kv.revision, "applied");
        Ok(kv)
    }

    async fn delete(&self, key: &Key) -> DatastoreResult<()> {
        let mut inner = self.inner.write();
        match inner.entries.remove(key) {
            Some(_) => {
                inner.next_revision();
                tracing::debug!(key = %key, "deleted");
                Ok(())
            }
            None => Err(DatastoreError::ResourceDoesNotExist(key.clone())),
        }
    }

    async fn get(&self, key: &Key) -> DatastoreResult<KeyValue> {
        let inner = self.inner.read();
        inner
            .entries
            .get(key)
            .map(|stored| KeyValue {
                key: key.clone(),
                value: stored.value.clone(),
                revision: Some(stored.revision),
            })
            .ok_or_else(|| DatastoreError::ResourceDoesNotExist(key.clone()))
    }

    async fn list(&self, selector: &ListSelector) -> DatastoreResult<Vec<KeyValue>> {
        let inner = self.inner.read();
        Ok(inner
            .entries
            .iter()
            .filter(|(key, _)| selector.matches(key))
            .map(|(key, stored)| KeyValue {
                key: key.clone(),
                value: stored.value.clone(),
                revision: Some(stored.revision),
            })
            .collect())
    }

    async fn ensure_initialized(&self) -> DatastoreResult<()> {
        tracing::debug!("in-memory datastore needs no initialisation");
        Ok(())
    }
}
