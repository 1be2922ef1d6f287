use super::{ResourceKind, api_object};
use crate::error::ValidationError;
use crate::validation::{Validate, parse_cidr, validate_as_number, validate_name};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeMetadata {
    pub name: String,
}

impl NodeMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Validate for NodeMetadata {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_name("name", &self.name)
    }
}

/// BGP identity of a node.  Addresses carry the node's subnet, e.g.
/// `10.0.0.5/24`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeBgpSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub as_number: Option<u32>,
    #[serde(rename = "ipv4Address", skip_serializing_if = "String::is_empty")]
    pub ipv4_address: String,
    #[serde(rename = "ipv6Address", skip_serializing_if = "String::is_empty")]
    pub ipv6_address: String,
}

impl Validate for NodeBgpSpec {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_as_number("asNumber", self.as_number)?;
        if !self.ipv4_address.is_empty()
            && !parse_cidr("ipv4Address", &self.ipv4_address)?.is_ipv4()
        {
            return Err(ValidationError::new("ipv4Address", "not an IPv4 address"));
        }
        if !self.ipv6_address.is_empty()
            && !parse_cidr("ipv6Address", &self.ipv6_address)?.is_ipv6()
        {
            return Err(ValidationError::new("ipv6Address", "not an IPv6 address"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bgp: Option<NodeBgpSpec>,
}

impl Validate for NodeSpec {
    fn validate(&self) -> Result<(), ValidationError> {
        match &self.bgp {
            Some(bgp) => bgp.validate().map_err(|e| e.nested("bgp")),
            None => Ok(()),
        }
    }
}

api_object!(
    /// A host running the dataplane agent.
    Node,
    ResourceKind::Node,
    NodeMetadata,
    NodeSpec
);
