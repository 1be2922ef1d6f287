use super::{ResourceKind, api_object};
use crate::error::ValidationError;
use crate::validation::{SCOPE_GLOBAL, SCOPE_NODE, Validate, validate_name, validate_scope};
use serde::{Deserialize, Serialize};

/// Global setting holding the cluster's unique identifier.
pub const CLUSTER_GUID: &str = "ClusterGUID";

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigMetadata {
    /// `global` or `node`.
    pub scope: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub node: String,
    pub name: String,
}

impl ConfigMetadata {
    pub fn global(name: impl Into<String>) -> Self {
        Self {
            scope: SCOPE_GLOBAL.to_string(),
            node: String::new(),
            name: name.into(),
        }
    }

    pub fn node(node: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            scope: SCOPE_NODE.to_string(),
            node: node.into(),
            name: name.into(),
        }
    }
}

impl Validate for ConfigMetadata {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_scope(&self.scope, &self.node)?;
        validate_name("node", &self.node)?;
        validate_name("name", &self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigSpec {
    pub value: String,
}

impl ConfigSpec {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl Validate for ConfigSpec {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

api_object!(
    /// A named configuration value, cluster-wide or for one node.
    Config,
    ResourceKind::Config,
    ConfigMetadata,
    ConfigSpec
);
