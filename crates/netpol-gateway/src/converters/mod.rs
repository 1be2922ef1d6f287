//! One [`ResourceConverter`](netpol_kernel::ResourceConverter) per resource kind.
//!
//! Keys carry the identity fields in a fixed order per kind.  Stored values
//! are the JSON encoding of everything else: the spec, plus non-identity
//! metadata such as labels where the kind has them.
//!
//! | Converter | Key identity |
//! |-----------|--------------|
//! | [`TierConverter`] | `name` |
//! | [`NodeConverter`] | `name` |
//! | [`PolicyConverter`] | `tier`, `name` |
//! | [`WorkloadEndpointConverter`] | `node`, `orchestrator`, `workload`, `name` |
//! | [`HostEndpointConverter`] | `node`, `name` |
//! | [`ProfileConverter`] | `name` |
//! | [`BgpPeerConverter`] | `scope`, `node`, `peerIP` |
//! | [`IpPoolConverter`] | `cidr` |
//! | [`ConfigConverter`] | `scope`, `node`, `name` |

mod bgp_peer;
mod config;
mod endpoint;
mod ip_pool;
mod node;
mod policy;
mod profile;
mod tier;

pub use bgp_peer::BgpPeerConverter;
pub use config::ConfigConverter;
pub use endpoint::{HostEndpointConverter, WorkloadEndpointConverter};
pub use ip_pool::IpPoolConverter;
pub use node::NodeConverter;
pub use policy::PolicyConverter;
pub use profile::ProfileConverter;
pub use tier::TierConverter;

use netpol_kernel::validation::SCOPE_NODE;
use netpol_kernel::{ConversionError, Key, KeyValue, ResourceKind};
use serde::Serialize;
use serde::de::DeserializeOwned;

// ─────────────────────────────────────────────────────────────────────────────
// Shared helpers
// ─────────────────────────────────────────────────────────────────────────────

/// JSON-encode the stored half of an object.
pub(crate) fn encode<T: Serialize>(
    kind: ResourceKind,
    value: &T,
) -> Result<Vec<u8>, ConversionError> {
    serde_json::to_vec(value).map_err(|e| ConversionError::to_backend(kind, e.to_string()))
}

/// Decode the stored half of an object.
pub(crate) fn decode<T: DeserializeOwned>(
    kind: ResourceKind,
    kv: &KeyValue,
) -> Result<T, ConversionError> {
    let bytes = kv.value.as_deref().ok_or_else(|| {
        ConversionError::from_backend(kind, format!("no value stored under {}", kv.key))
    })?;
    serde_json::from_slice(bytes).map_err(|e| {
        ConversionError::from_backend(kind, format!("undecodable value under {}: {e}", kv.key))
    })
}

/// A required identity field, rejected when empty.
pub(crate) fn require<'a>(
    kind: ResourceKind,
    field: &str,
    value: &'a str,
) -> Result<&'a str, ConversionError> {
    if value.is_empty() {
        Err(ConversionError::missing_field(kind, field))
    } else {
        Ok(value)
    }
}

/// A selector position: empty means "any".
pub(crate) fn wildcard(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Identity of a stored key, checked against the converter's kind and arity.
pub(crate) fn identity<const N: usize>(
    kind: ResourceKind,
    key: &Key,
) -> Result<[String; N], ConversionError> {
    if key.kind() != kind {
        return Err(ConversionError::from_backend(
            kind,
            format!("key {key} belongs to kind {}", key.kind()),
        ));
    }
    <[String; N]>::try_from(key.identity().to_vec()).map_err(|parts| {
        ConversionError::from_backend(
            kind,
            format!("key {key} has {} identity parts, expected {N}", parts.len()),
        )
    })
}

/// `node` is required for node-scoped objects and absent for global ones.
pub(crate) fn scoped_node(
    kind: ResourceKind,
    scope: &str,
    node: &str,
) -> Result<String, ConversionError> {
    if scope == SCOPE_NODE {
        require(kind, "node", node).map(str::to_string)
    } else {
        Ok(String::new())
    }
}
