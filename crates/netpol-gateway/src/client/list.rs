//! List aggregation: stored pairs to a typed collection.

use netpol_kernel::{ConversionError, KeyValue, ResourceConverter, ResourceList};

/// Convert `kvs` in order into a [`ResourceList`].
///
/// Stops at the first pair that fails to convert and returns that error; a
/// partial collection is never returned.
pub fn aggregate<C: ResourceConverter>(
    converter: &C,
    kvs: Vec<KeyValue>,
) -> Result<ResourceList<C::Resource>, ConversionError> {
    let items = kvs
        .iter()
        .map(|kv| converter.from_key_value(kv))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ResourceList::new(items))
}
