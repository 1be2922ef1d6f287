//! Resource gateway
//!
//! [`Client`] is the kind-agnostic CRUD engine.  Every operation runs the
//! same pipeline:
//!
//! ```text
//! validate ──▶ convert (ResourceConverter) ──▶ Backend ──▶ convert back
//! ```
//!
//! Validation always happens before conversion, and conversion before any
//! datastore access, so no kind can reach the datastore with unchecked
//! input.  The client holds nothing but a shared datastore handle.

mod interface;
pub mod list;

pub use interface::ResourceInterface;
pub use list::aggregate;

use crate::backend;
use crate::converters::ConfigConverter;
use netpol_kernel::api::config::CLUSTER_GUID;
use netpol_kernel::api::{Config, ConfigMetadata, ConfigSpec};
use netpol_kernel::config::ClientConfig;
use netpol_kernel::validation::validate;
use netpol_kernel::{
    Backend, ClientError, ClientResult, DatastoreError, MetadataOf, Resource, ResourceConverter,
    ResourceList,
};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Which identity outcomes an operation may report as such.  Anything else
/// the datastore says is surfaced as a plain backend failure.
#[derive(Clone, Copy)]
struct IdentityOutcomes {
    already_exists: bool,
    not_found: bool,
}

impl IdentityOutcomes {
    const CREATE: Self = Self {
        already_exists: true,
        not_found: false,
    };
    const EXISTING: Self = Self {
        already_exists: false,
        not_found: true,
    };
    const NONE: Self = Self {
        already_exists: false,
        not_found: false,
    };

    fn map(self, err: DatastoreError) -> ClientError {
        match err {
            DatastoreError::ResourceAlreadyExists(key) if self.already_exists => {
                ClientError::AlreadyExists(key)
            }
            DatastoreError::ResourceDoesNotExist(key) if self.not_found => {
                ClientError::NotFound(key)
            }
            other => ClientError::Backend(other),
        }
    }
}

/// Kind-agnostic resource gateway over a shared [`Backend`].
#[derive(Clone)]
pub struct Client {
    backend: Arc<dyn Backend>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client").finish_non_exhaustive()
    }
}

impl Client {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Connect to the datastore named by `config`.
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self::new(backend::connect(config)))
    }

    pub fn backend(&self) -> &Arc<dyn Backend> {
        &self.backend
    }

    // ── Untyped operations ──────────────────────────────────────────────────

    /// Store a new object.  Fails with `AlreadyExists` if its key is taken.
    pub async fn create<C: ResourceConverter>(
        &self,
        converter: &C,
        resource: &C::Resource,
    ) -> ClientResult<C::Resource> {
        validate(resource)?;
        let kv = converter.to_key_value(resource)?;
        debug!(kind = %C::Resource::KIND, key = %kv.key, "create");
        let stored = self
            .backend
            .create(kv)
            .await
            .map_err(|e| IdentityOutcomes::CREATE.map(e))?;
        info!(
            kind = %C::Resource::KIND,
            key = %stored.key,
            revision = ?stored.revision,
            "resource created"
        );
        Ok(converter.from_key_value(&stored)?)
    }

    /// Replace the spec of an existing object.  Fails with `NotFound` if
    /// absent.
    pub async fn update<C: ResourceConverter>(
        &self,
        converter: &C,
        resource: &C::Resource,
    ) -> ClientResult<C::Resource> {
        validate(resource)?;
        let kv = converter.to_key_value(resource)?;
        debug!(kind = %C::Resource::KIND, key = %kv.key, "update");
        let stored = self
            .backend
            .update(kv)
            .await
            .map_err(|e| IdentityOutcomes::EXISTING.map(e))?;
        info!(
            kind = %C::Resource::KIND,
            key = %stored.key,
            revision = ?stored.revision,
            "resource updated"
        );
        Ok(converter.from_key_value(&stored)?)
    }

    /// Create or replace.  Never reports an identity conflict.
    pub async fn apply<C: ResourceConverter>(
        &self,
        converter: &C,
        resource: &C::Resource,
    ) -> ClientResult<C::Resource> {
        validate(resource)?;
        let kv = converter.to_key_value(resource)?;
        debug!(kind = %C::Resource::KIND, key = %kv.key, "apply");
        let stored = self
            .backend
            .apply(kv)
            .await
            .map_err(|e| IdentityOutcomes::NONE.map(e))?;
        info!(
            kind = %C::Resource::KIND,
            key = %stored.key,
            revision = ?stored.revision,
            "resource applied"
        );
        Ok(converter.from_key_value(&stored)?)
    }

    /// Remove the object named by fully-specified `metadata`.
    pub async fn delete<C: ResourceConverter>(
        &self,
        converter: &C,
        metadata: &MetadataOf<C>,
    ) -> ClientResult<()> {
        validate(metadata)?;
        let key = converter.to_key(metadata)?;
        debug!(kind = %C::Resource::KIND, key = %key, "delete");
        self.backend
            .delete(&key)
            .await
            .map_err(|e| IdentityOutcomes::EXISTING.map(e))?;
        info!(kind = %C::Resource::KIND, key = %key, "resource deleted");
        Ok(())
    }

    /// Fetch the object named by fully-specified `metadata`.
    pub async fn get<C: ResourceConverter>(
        &self,
        converter: &C,
        metadata: &MetadataOf<C>,
    ) -> ClientResult<C::Resource> {
        validate(metadata)?;
        let key = converter.to_key(metadata)?;
        debug!(kind = %C::Resource::KIND, key = %key, "get");
        let kv = self
            .backend
            .get(&key)
            .await
            .map_err(|e| IdentityOutcomes::EXISTING.map(e))?;
        Ok(converter.from_key_value(&kv)?)
    }

    /// All objects matching partial `metadata`, in datastore order.
    ///
    /// All-or-nothing: one undecodable entry fails the whole call.
    pub async fn list<C: ResourceConverter>(
        &self,
        converter: &C,
        metadata: &MetadataOf<C>,
    ) -> ClientResult<ResourceList<C::Resource>> {
        validate(metadata)?;
        let selector = converter.to_list_selector(metadata);
        debug!(kind = %C::Resource::KIND, selector = ?selector, "list");
        let kvs = self
            .backend
            .list(&selector)
            .await
            .map_err(|e| IdentityOutcomes::NONE.map(e))?;
        Ok(aggregate(converter, kvs)?)
    }

    // ── Initialisation ──────────────────────────────────────────────────────

    /// Prepare the datastore and make sure the cluster has a GUID.
    ///
    /// Idempotent: an existing GUID is kept.
    pub async fn ensure_initialized(&self) -> ClientResult<()> {
        self.backend
            .ensure_initialized()
            .await
            .map_err(|e| IdentityOutcomes::NONE.map(e))?;

        let guid = Config::new(
            ConfigMetadata::global(CLUSTER_GUID),
            ConfigSpec::new(Uuid::new_v4().simple().to_string()),
        );
        match self.create(&ConfigConverter, &guid).await {
            Ok(created) => {
                info!(guid = %created.spec.value, "Assigned cluster GUID");
                Ok(())
            }
            Err(ClientError::AlreadyExists(key)) => {
                debug!(key = %key, "Cluster GUID already assigned");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::converters::{PolicyConverter, TierConverter};
    use netpol_kernel::api::{Policy, PolicyMetadata, PolicySpec, Tier, TierMetadata, TierSpec};

    fn client() -> Client {
        Client::new(Arc::new(MemoryBackend::new()))
    }

    fn tier(name: &str, order: f64) -> Tier {
        Tier::new(TierMetadata::new(name), TierSpec { order: Some(order) })
    }

    #[tokio::test]
    async fn create_then_get_returns_equal_object() {
        let client = client();
        let t1 = tier("t1", 100.0);
        client.create(&TierConverter, &t1).await.unwrap();
        let got = client.get(&TierConverter, &t1.metadata).await.unwrap();
        assert_eq!(got, t1);
    }

    #[tokio::test]
    async fn duplicate_create_is_already_exists_and_keeps_original() {
        let client = client();
        client.create(&TierConverter, &tier("t1", 1.0)).await.unwrap();
        let err = client
            .create(&TierConverter, &tier("t1", 2.0))
            .await
            .unwrap_err();
        assert!(err.is_already_exists());

        let got = client.get(&TierConverter, &TierMetadata::new("t1")).await.unwrap();
        assert_eq!(got.spec.order, Some(1.0));
    }

    #[tokio::test]
    async fn update_of_missing_object_is_not_found() {
        let client = client();
        let err = client
            .update(&TierConverter, &tier("t1", 1.0))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn apply_never_reports_identity_conflicts() {
        let client = client();
        for _ in 0..3 {
            client.apply(&TierConverter, &tier("t1", 5.0)).await.unwrap();
        }
        let list = client.list(&TierConverter, &TierMetadata::default()).await.unwrap();
        assert_eq!(list.items, vec![tier("t1", 5.0)]);
    }

    #[tokio::test]
    async fn delete_is_durable() {
        let client = client();
        let md = TierMetadata::new("t1");
        client.create(&TierConverter, &tier("t1", 1.0)).await.unwrap();
        client.delete(&TierConverter, &md).await.unwrap();
        assert!(client.get(&TierConverter, &md).await.unwrap_err().is_not_found());
        assert!(client.delete(&TierConverter, &md).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn validation_fails_before_conversion() {
        let client = client();
        let bad = tier("bad name", 1.0);
        assert!(matches!(
            client.create(&TierConverter, &bad).await,
            Err(ClientError::Validation(_))
        ));

        // Valid but incomplete: conversion rejects it.
        let unnamed = tier("", 1.0);
        assert!(matches!(
            client.create(&TierConverter, &unnamed).await,
            Err(ClientError::Conversion(_))
        ));
    }

    #[tokio::test]
    async fn policy_in_default_tier_is_found_by_either_name() {
        let client = client();
        let policy = Policy::new(PolicyMetadata::new("", "p1"), PolicySpec::default());
        let created = client.create(&PolicyConverter, &policy).await.unwrap();
        assert_eq!(created.metadata.tier, "default");

        let got = client
            .get(&PolicyConverter, &PolicyMetadata::new("default", "p1"))
            .await
            .unwrap();
        assert_eq!(got, created);
    }

    #[tokio::test]
    async fn ensure_initialized_assigns_guid_once() {
        let client = client();
        client.ensure_initialized().await.unwrap();
        let first = client
            .get(&ConfigConverter, &ConfigMetadata::global(CLUSTER_GUID))
            .await
            .unwrap();
        assert_eq!(first.spec.value.len(), 32);

        client.ensure_initialized().await.unwrap();
        let second = client
            .get(&ConfigConverter, &ConfigMetadata::global(CLUSTER_GUID))
            .await
            .unwrap();
        assert_eq!(first, second);
    }
}
