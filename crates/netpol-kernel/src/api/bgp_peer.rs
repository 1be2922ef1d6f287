use super::{ResourceKind, api_object};
use crate::error::ValidationError;
use crate::validation::{
    Validate, validate_as_number, validate_canonical_ip, validate_name, validate_scope,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BgpPeerMetadata {
    /// `global` or `node`.
    pub scope: String,
    /// Set only for node-scoped peers.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub node: String,
    #[serde(rename = "peerIP")]
    pub peer_ip: String,
}

impl BgpPeerMetadata {
    pub fn global(peer_ip: impl Into<String>) -> Self {
        Self {
            scope: crate::validation::SCOPE_GLOBAL.to_string(),
            node: String::new(),
            peer_ip: peer_ip.into(),
        }
    }

    pub fn node(node: impl Into<String>, peer_ip: impl Into<String>) -> Self {
        Self {
            scope: crate::validation::SCOPE_NODE.to_string(),
            node: node.into(),
            peer_ip: peer_ip.into(),
        }
    }
}

impl Validate for BgpPeerMetadata {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_scope(&self.scope, &self.node)?;
        validate_name("node", &self.node)?;
        validate_canonical_ip("peerIP", &self.peer_ip)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BgpPeerSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub as_number: Option<u32>,
}

impl Validate for BgpPeerSpec {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_as_number("asNumber", self.as_number)
    }
}

api_object!(
    /// A BGP neighbour, either for every node or for one.
    BgpPeer,
    ResourceKind::BgpPeer,
    BgpPeerMetadata,
    BgpPeerSpec
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_peer_must_not_name_a_node() {
        let mut peer = BgpPeer::new(BgpPeerMetadata::global("10.0.0.1"), BgpPeerSpec::default());
        assert!(peer.validate().is_ok());
        peer.metadata.node = "node-1".into();
        assert_eq!(peer.validate().unwrap_err().field, "metadata.node");
    }

    #[test]
    fn peer_ip_wire_name() {
        let peer: BgpPeer = serde_json::from_str(
            r#"{
                "metadata": {"scope": "node", "node": "n1", "peerIP": "fd00::1"},
                "spec": {"asNumber": 64513}
            }"#,
        )
        .unwrap();
        assert_eq!(peer.metadata.peer_ip, "fd00::1");
        assert!(peer.validate().is_ok());
    }

    #[test]
    fn peer_ip_must_be_in_shortest_form() {
        let peer = BgpPeer::new(BgpPeerMetadata::global("fd00:0:0::1"), BgpPeerSpec::default());
        assert_eq!(peer.validate().unwrap_err().field, "metadata.peerIP");
    }
}
