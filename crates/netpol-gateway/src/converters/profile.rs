use super::{decode, encode, identity, require, wildcard};
use netpol_kernel::api::{Profile, ProfileMetadata, ProfileSpec};
use netpol_kernel::{ConversionError, Key, KeyValue, ListSelector, Resource, ResourceConverter};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct StoredProfile {
    labels: BTreeMap<String, String>,
    tags: Vec<String>,
    spec: ProfileSpec,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileConverter;

impl ResourceConverter for ProfileConverter {
    type Resource = Profile;

    fn to_key_value(&self, profile: &Profile) -> Result<KeyValue, ConversionError> {
        let key = self.to_key(&profile.metadata)?;
        let stored = StoredProfile {
            labels: profile.metadata.labels.clone(),
            tags: profile.metadata.tags.clone(),
            spec: profile.spec.clone(),
        };
        Ok(KeyValue::new(key, encode(Profile::KIND, &stored)?))
    }

    fn from_key_value(&self, kv: &KeyValue) -> Result<Profile, ConversionError> {
        let [name] = identity(Profile::KIND, &kv.key)?;
        let stored: StoredProfile = decode(Profile::KIND, kv)?;
        Ok(Profile::new(
            ProfileMetadata {
                name,
                labels: stored.labels,
                tags: stored.tags,
            },
            stored.spec,
        ))
    }

    fn to_key(&self, metadata: &ProfileMetadata) -> Result<Key, ConversionError> {
        let name = require(Profile::KIND, "name", &metadata.name)?;
        Ok(Key::new(Profile::KIND, [name]))
    }

    fn to_list_selector(&self, metadata: &ProfileMetadata) -> ListSelector {
        ListSelector::new(Profile::KIND, vec![wildcard(&metadata.name)])
    }
}
