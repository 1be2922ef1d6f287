use super::{decode, encode, identity, require, wildcard};
use netpol_kernel::api::{IpPool, IpPoolMetadata, IpPoolSpec};
use netpol_kernel::{ConversionError, Key, KeyValue, ListSelector, Resource, ResourceConverter};

/// Pools are keyed by their network address, which validation holds to
/// canonical form.
#[derive(Debug, Clone, Copy, Default)]
pub struct IpPoolConverter;

impl ResourceConverter for IpPoolConverter {
    type Resource = IpPool;

    fn to_key_value(&self, pool: &IpPool) -> Result<KeyValue, ConversionError> {
        let key = self.to_key(&pool.metadata)?;
        Ok(KeyValue::new(key, encode(IpPool::KIND, &pool.spec)?))
    }

    fn from_key_value(&self, kv: &KeyValue) -> Result<IpPool, ConversionError> {
        let [cidr] = identity(IpPool::KIND, &kv.key)?;
        let spec: IpPoolSpec = decode(IpPool::KIND, kv)?;
        Ok(IpPool::new(IpPoolMetadata { cidr }, spec))
    }

    fn to_key(&self, metadata: &IpPoolMetadata) -> Result<Key, ConversionError> {
        let cidr = require(IpPool::KIND, "cidr", &metadata.cidr)?;
        Ok(Key::new(IpPool::KIND, [cidr]))
    }

    fn to_list_selector(&self, metadata: &IpPoolMetadata) -> ListSelector {
        ListSelector::new(IpPool::KIND, vec![wildcard(&metadata.cidr)])
    }
}
