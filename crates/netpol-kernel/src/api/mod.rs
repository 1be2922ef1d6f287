//! Typed API objects.
//!
//! Every object has the same envelope:
//!
//! ```json
//! { "apiVersion": "v1", "kind": "tier", "metadata": { "name": "t1" }, "spec": { "order": 100 } }
//! ```
//!
//! `metadata` carries identity (immutable once the object exists) and `spec`
//! carries the updatable payload.  Metadata types double as list filters:
//! any identity field left empty acts as a wildcard.

pub mod bgp_peer;
pub mod config;
pub mod endpoint;
pub mod ip_pool;
pub mod node;
pub mod policy;
pub mod profile;
pub mod rule;
pub mod tier;

pub use bgp_peer::{BgpPeer, BgpPeerMetadata, BgpPeerSpec};
pub use config::{Config, ConfigMetadata, ConfigSpec};
pub use endpoint::{
    HostEndpoint, HostEndpointMetadata, HostEndpointSpec, WorkloadEndpoint,
    WorkloadEndpointMetadata, WorkloadEndpointSpec,
};
pub use ip_pool::{IpPool, IpPoolMetadata, IpPoolSpec, IpipConfig};
pub use node::{Node, NodeBgpSpec, NodeMetadata, NodeSpec};
pub use policy::{Policy, PolicyMetadata, PolicySpec};
pub use profile::{Profile, ProfileMetadata, ProfileSpec};
pub use rule::{EntityRule, Port, Rule, RuleAction};
pub use tier::{Tier, TierMetadata, TierSpec};

use crate::validation::Validate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The only API version this build understands.
pub const API_VERSION: &str = "v1";

// ─────────────────────────────────────────────────────────────────────────────
// ResourceKind
// ─────────────────────────────────────────────────────────────────────────────

/// Closed set of manageable resource kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResourceKind {
    Tier,
    Node,
    Policy,
    WorkloadEndpoint,
    HostEndpoint,
    Profile,
    BgpPeer,
    IpPool,
    Config,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 9] = [
        ResourceKind::Tier,
        ResourceKind::Node,
        ResourceKind::Policy,
        ResourceKind::WorkloadEndpoint,
        ResourceKind::HostEndpoint,
        ResourceKind::Profile,
        ResourceKind::BgpPeer,
        ResourceKind::IpPool,
        ResourceKind::Config,
    ];

    /// Wire name used in the `kind` field and in datastore paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Tier => "tier",
            ResourceKind::Node => "node",
            ResourceKind::Policy => "policy",
            ResourceKind::WorkloadEndpoint => "workloadEndpoint",
            ResourceKind::HostEndpoint => "hostEndpoint",
            ResourceKind::Profile => "profile",
            ResourceKind::BgpPeer => "bgpPeer",
            ResourceKind::IpPool => "ipPool",
            ResourceKind::Config => "config",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Resource trait
// ─────────────────────────────────────────────────────────────────────────────

/// Implemented by every API object type.
pub trait Resource:
    Validate + Serialize + DeserializeOwned + Clone + Send + Sync + 'static
{
    /// Identity-bearing half of the object; also used as a list filter.
    type Metadata: Validate
        + Serialize
        + DeserializeOwned
        + Default
        + Clone
        + Send
        + Sync
        + 'static;

    const KIND: ResourceKind;

    fn metadata(&self) -> &Self::Metadata;
}

// ─────────────────────────────────────────────────────────────────────────────
// ResourceList
// ─────────────────────────────────────────────────────────────────────────────

/// Ordered collection of objects of one kind, as returned by `list`.
///
/// Order is the datastore's enumeration order; an empty list is a valid
/// result, distinct from an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceList<R> {
    pub api_version: String,
    pub kind: String,
    pub items: Vec<R>,
}

impl<R: Resource> ResourceList<R> {
    pub fn new(items: Vec<R>) -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: format!("{}List", R::KIND),
            items,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.items.iter()
    }
}

impl<R> IntoIterator for ResourceList<R> {
    type Item = R;
    type IntoIter = std::vec::IntoIter<R>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Envelope macro
// ─────────────────────────────────────────────────────────────────────────────

/// Declares the `{apiVersion, kind, metadata, spec}` envelope for one kind,
/// with defaults for the type fields, a constructor, the [`Resource`] impl and
/// a [`Validate`] impl that checks the envelope then metadata then spec.
///
/// An optional trailing `check = method` names an inherent method run last,
/// for rules spanning metadata and spec.
macro_rules! api_object {
    ($(#[$doc:meta])* $name:ident, $kind:expr, $metadata:ty, $spec:ty) => {
        $crate::api::api_object!(
            $(#[$doc])* $name, $kind, $metadata, $spec, check = no_cross_field_rules
        );

        impl $name {
            fn no_cross_field_rules(&self) -> Result<(), $crate::error::ValidationError> {
                Ok(())
            }
        }
    };
    ($(#[$doc:meta])* $name:ident, $kind:expr, $metadata:ty, $spec:ty, check = $check:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "camelCase", default)]
        pub struct $name {
            pub api_version: String,
            pub kind: String,
            pub metadata: $metadata,
            pub spec: $spec,
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new(<$metadata>::default(), <$spec>::default())
            }
        }

        impl $name {
            pub fn new(metadata: $metadata, spec: $spec) -> Self {
                Self {
                    api_version: $crate::api::API_VERSION.to_string(),
                    kind: $kind.as_str().to_string(),
                    metadata,
                    spec,
                }
            }
        }

        impl $crate::api::Resource for $name {
            type Metadata = $metadata;
            const KIND: $crate::api::ResourceKind = $kind;

            fn metadata(&self) -> &Self::Metadata {
                &self.metadata
            }
        }

        impl $crate::validation::Validate for $name {
            fn validate(&self) -> Result<(), $crate::error::ValidationError> {
                $crate::validation::validate_type_meta($kind, &self.api_version, &self.kind)?;
                $crate::validation::Validate::validate(&self.metadata)
                    .map_err(|e| e.nested("metadata"))?;
                $crate::validation::Validate::validate(&self.spec).map_err(|e| e.nested("spec"))?;
                self.$check()
            }
        }
    };
}

pub(crate) use api_object;
