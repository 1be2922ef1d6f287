use super::{decode, encode, identity, require, scoped_node, wildcard};
use netpol_kernel::api::{BgpPeer, BgpPeerMetadata, BgpPeerSpec};
use netpol_kernel::{ConversionError, Key, KeyValue, ListSelector, Resource, ResourceConverter};

/// Peers are keyed by scope, node (empty for global peers) and the peer
/// address, which validation holds to its shortest text form.
#[derive(Debug, Clone, Copy, Default)]
pub struct BgpPeerConverter;

impl ResourceConverter for BgpPeerConverter {
    type Resource = BgpPeer;

    fn to_key_value(&self, peer: &BgpPeer) -> Result<KeyValue, ConversionError> {
        let key = self.to_key(&peer.metadata)?;
        Ok(KeyValue::new(key, encode(BgpPeer::KIND, &peer.spec)?))
    }

    fn from_key_value(&self, kv: &KeyValue) -> Result<BgpPeer, ConversionError> {
        let [scope, node, peer_ip] = identity(BgpPeer::KIND, &kv.key)?;
        let spec: BgpPeerSpec = decode(BgpPeer::KIND, kv)?;
        Ok(BgpPeer::new(BgpPeerMetadata { scope, node, peer_ip }, spec))
    }

    fn to_key(&self, metadata: &BgpPeerMetadata) -> Result<Key, ConversionError> {
        let kind = BgpPeer::KIND;
        let scope = require(kind, "scope", &metadata.scope)?;
        let node = scoped_node(kind, scope, &metadata.node)?;
        let peer_ip = require(kind, "peerIP", &metadata.peer_ip)?;
        Ok(Key::new(kind, [scope.to_string(), node, peer_ip.to_string()]))
    }

    fn to_list_selector(&self, metadata: &BgpPeerMetadata) -> ListSelector {
        ListSelector::new(
            BgpPeer::KIND,
            vec![
                wildcard(&metadata.scope),
                wildcard(&metadata.node),
                wildcard(&metadata.peer_ip),
            ],
        )
    }
}
