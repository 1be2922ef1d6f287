use super::{decode, encode, identity, require, wildcard};
use netpol_kernel::api::{Node, NodeMetadata, NodeSpec};
use netpol_kernel::{ConversionError, Key, KeyValue, ListSelector, Resource, ResourceConverter};

#[derive(Debug, Clone, Copy, Default)]
pub struct NodeConverter;

impl ResourceConverter for NodeConverter {
    type Resource = Node;

    fn to_key_value(&self, node: &Node) -> Result<KeyValue, ConversionError> {
        let key = self.to_key(&node.metadata)?;
        Ok(KeyValue::new(key, encode(Node::KIND, &node.spec)?))
    }

    fn from_key_value(&self, kv: &KeyValue) -> Result<Node, ConversionError> {
        let [name] = identity(Node::KIND, &kv.key)?;
        let spec: NodeSpec = decode(Node::KIND, kv)?;
        Ok(Node::new(NodeMetadata { name }, spec))
    }

    fn to_key(&self, metadata: &NodeMetadata) -> Result<Key, ConversionError> {
        let name = require(Node::KIND, "name", &metadata.name)?;
        Ok(Key::new(Node::KIND, [name]))
    }

    fn to_list_selector(&self, metadata: &NodeMetadata) -> ListSelector {
        ListSelector::new(Node::KIND, vec![wildcard(&metadata.name)])
    }
}
