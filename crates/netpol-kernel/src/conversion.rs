//! Conversion contract between typed API objects and datastore pairs.
//!
//! One implementation exists per [`ResourceKind`](crate::api::ResourceKind).
//! All methods are pure: no I/O, no interior state, same input ⇒ same output.

use crate::api::Resource;
use crate::error::ConversionError;
use crate::model::{Key, KeyValue, ListSelector};

/// Metadata type of the resource handled by converter `C`.
pub type MetadataOf<C> = <<C as ResourceConverter>::Resource as Resource>::Metadata;

/// Per-kind strategy that keeps the gateway kind-agnostic.
pub trait ResourceConverter: Send + Sync {
    type Resource: Resource;

    /// Map an object to exactly one key/value pair.
    ///
    /// Fails when an identity field required to name the object is missing.
    fn to_key_value(&self, resource: &Self::Resource) -> Result<KeyValue, ConversionError>;

    /// Rebuild an object from a stored pair.
    ///
    /// Fails when the value is absent or does not decode into the kind's shape.
    fn from_key_value(&self, kv: &KeyValue) -> Result<Self::Resource, ConversionError>;

    /// Map fully-specified metadata to the key of the single object it names.
    fn to_key(&self, metadata: &MetadataOf<Self>) -> Result<Key, ConversionError>;

    /// Map partial metadata to a selector.  Empty fields are wildcards, so
    /// empty metadata selects the whole kind.
    fn to_list_selector(&self, metadata: &MetadataOf<Self>) -> ListSelector;
}
