use async_trait::async_trait;
use netpol_gateway::backend::MemoryBackend;
use netpol_kernel::{Backend, DatastoreError, DatastoreResult, Key, KeyValue, ListSelector};
use std::sync::Arc;
use tokio::sync::RwLock;

/// One datastore call as seen by [`MockBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    Create(Key),
    Update(Key),
    Apply(Key),
    Delete(Key),
    Get(Key),
    List(ListSelector),
    EnsureInitialized,
}

/// A datastore double backed by [`MemoryBackend`].
///
/// Every call is recorded before it runs, so tests can assert that a request
/// rejected up front never reached the datastore.  A failure can be queued
/// with [`fail_next`](Self::fail_next) to simulate an unreachable store.
#[derive(Clone, Default)]
pub struct MockBackend {
    store: Arc<MemoryBackend>,
    /// Track all calls made to this backend
    pub call_history: Arc<RwLock<Vec<BackendCall>>>,
    /// Failure returned by the next call, then cleared
    pub queued_failure: Arc<RwLock<Option<DatastoreError>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next call fail with `err` without touching the store.
    pub async fn fail_next(&self, err: DatastoreError) {
        *self.queued_failure.write().await = Some(err);
    }

    /// Shorthand for queuing an `Unavailable` failure.
    pub async fn go_offline_once(&self) {
        self.fail_next(DatastoreError::Unavailable("mock datastore offline".into()))
            .await;
    }

    /// Store `bytes` under `key` unchecked and unrecorded, e.g. to plant a
    /// value no converter can decode.
    pub fn plant(&self, key: Key, bytes: impl Into<Vec<u8>>) -> KeyValue {
        self.store.insert_raw(KeyValue::new(key, bytes.into()))
    }

    /// Number of objects currently stored.
    pub fn stored(&self) -> usize {
        self.store.len()
    }

    /// Retrieve the history of calls made to this backend
    pub async fn history(&self) -> Vec<BackendCall> {
        self.call_history.read().await.clone()
    }

    /// Check the total number of calls made to this backend
    pub async fn call_count(&self) -> usize {
        self.call_history.read().await.len()
    }

    pub async fn clear_history(&self) {
        self.call_history.write().await.clear();
    }

    async fn record(&self, call: BackendCall) -> DatastoreResult<()> {
        tracing::trace!(?call, "mock backend call");
        self.call_history.write().await.push(call);
        match self.queued_failure.write().await.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn create(&self, kv: KeyValue) -> DatastoreResult<KeyValue> {
        self.record(BackendCall::Create(kv.key.clone())).await?;
        self.store.create(kv).await
    }

    async fn update(&self, kv: KeyValue) -> DatastoreResult<KeyValue> {
        self.record(BackendCall::Update(kv.key.clone())).await?;
        self.store.update(kv).await
    }

    async fn apply(&self, kv: KeyValue) -> DatastoreResult<KeyValue> {
        self.record(BackendCall::Apply(kv.key.clone())).await?;
        self.store.apply(kv).await
    }

    async fn delete(&self, key: &Key) -> DatastoreResult<()> {
        self.record(BackendCall::Delete(key.clone())).await?;
        self.store.delete(key).await
    }

    async fn get(&self, key: &Key) -> DatastoreResult<KeyValue> {
        self.record(BackendCall::Get(key.clone())).await?;
        self.store.get(key).await
    }

    async fn list(&self, selector: &ListSelector) -> DatastoreResult<Vec<KeyValue>> {
        self.record(BackendCall::List(selector.clone())).await?;
        self.store.list(selector).await
    }

    async fn ensure_initialized(&self) -> DatastoreResult<()> {
        self.record(BackendCall::EnsureInitialized).await?;
        self.store.ensure_initialized().await
    }
}

#[macro_export]
macro_rules! assert_backend_called {
    ($backend:expr, $expected_count:expr) => {
        let count = $backend.call_count().await;
        assert_eq!(
            count, $expected_count,
            "Expected the datastore to be called {} times, but it was called {} times: {:?}",
            $expected_count,
            count,
            $backend.history().await
        );
    };
}
