use super::{decode, encode, identity, require, wildcard};
use netpol_kernel::api::{Tier, TierMetadata, TierSpec};
use netpol_kernel::{ConversionError, Key, KeyValue, ListSelector, Resource, ResourceConverter};

/// Tiers are keyed by name and store only their spec.
#[derive(Debug, Clone, Copy, Default)]
pub struct TierConverter;

impl ResourceConverter for TierConverter {
    type Resource = Tier;

    fn to_key_value(&self, tier: &Tier) -> Result<KeyValue, ConversionError> {
        let key = self.to_key(&tier.metadata)?;
        Ok(KeyValue::new(key, encode(Tier::KIND, &tier.spec)?))
    }

    fn from_key_value(&self, kv: &KeyValue) -> Result<Tier, ConversionError> {
        let [name] = identity(Tier::KIND, &kv.key)?;
        let spec: TierSpec = decode(Tier::KIND, kv)?;
        Ok(Tier::new(TierMetadata { name }, spec))
    }

    fn to_key(&self, metadata: &TierMetadata) -> Result<Key, ConversionError> {
        let name = require(Tier::KIND, "name", &metadata.name)?;
        Ok(Key::new(Tier::KIND, [name]))
    }

    fn to_list_selector(&self, metadata: &TierMetadata) -> ListSelector {
        ListSelector::new(Tier::KIND, vec![wildcard(&metadata.name)])
    }
}
