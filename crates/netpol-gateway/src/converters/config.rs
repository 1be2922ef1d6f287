use super::{decode, encode, identity, require, scoped_node, wildcard};
use netpol_kernel::api::{Config, ConfigMetadata, ConfigSpec};
use netpol_kernel::{ConversionError, Key, KeyValue, ListSelector, Resource, ResourceConverter};

#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigConverter;

impl ResourceConverter for ConfigConverter {
    type Resource = Config;

    fn to_key_value(&self, config: &Config) -> Result<KeyValue, ConversionError> {
        let key = self.to_key(&config.metadata)?;
        Ok(KeyValue::new(key, encode(Config::KIND, &config.spec)?))
    }

    fn from_key_value(&self, kv: &KeyValue) -> Result<Config, ConversionError> {
        let [scope, node, name] = identity(Config::KIND, &kv.key)?;
        let spec: ConfigSpec = decode(Config::KIND, kv)?;
        Ok(Config::new(ConfigMetadata { scope, node, name }, spec))
    }

    fn to_key(&self, metadata: &ConfigMetadata) -> Result<Key, ConversionError> {
        let kind = Config::KIND;
        let scope = require(kind, "scope", &metadata.scope)?;
        let node = scoped_node(kind, scope, &metadata.node)?;
        let name = require(kind, "name", &metadata.name)?;
        Ok(Key::new(kind, [scope.to_string(), node, name.to_string()]))
    }

    fn to_list_selector(&self, metadata: &ConfigMetadata) -> ListSelector {
        ListSelector::new(
            Config::KIND,
            vec![
                wildcard(&metadata.scope),
                wildcard(&metadata.node),
                wildcard(&metadata.name),
            ],
        )
    }
}
