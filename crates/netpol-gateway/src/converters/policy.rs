use super::{decode, encode, identity, require, wildcard};
use netpol_kernel::api::tier::DEFAULT_TIER;
use netpol_kernel::api::{Policy, PolicyMetadata, PolicySpec};
use netpol_kernel::{ConversionError, Key, KeyValue, ListSelector, Resource, ResourceConverter};

/// Policies live under their tier; an unnamed tier is the default tier.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyConverter;

impl ResourceConverter for PolicyConverter {
    type Resource = Policy;

    fn to_key_value(&self, policy: &Policy) -> Result<KeyValue, ConversionError> {
        let key = self.to_key(&policy.metadata)?;
        Ok(KeyValue::new(key, encode(Policy::KIND, &policy.spec)?))
    }

    fn from_key_value(&self, kv: &KeyValue) -> Result<Policy, ConversionError> {
        let [tier, name] = identity(Policy::KIND, &kv.key)?;
        let spec: PolicySpec = decode(Policy::KIND, kv)?;
        Ok(Policy::new(PolicyMetadata { tier, name }, spec))
    }

    fn to_key(&self, metadata: &PolicyMetadata) -> Result<Key, ConversionError> {
        let name = require(Policy::KIND, "name", &metadata.name)?;
        let tier = if metadata.tier.is_empty() {
            DEFAULT_TIER
        } else {
            metadata.tier.as_str()
        };
        Ok(Key::new(Policy::KIND, [tier, name]))
    }

    fn to_list_selector(&self, metadata: &PolicyMetadata) -> ListSelector {
        ListSelector::new(
            Policy::KIND,
            vec![wildcard(&metadata.tier), wildcard(&metadata.name)],
        )
    }
}
