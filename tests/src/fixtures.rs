//! Valid, fully-identified objects of every kind.

use netpol_kernel::api::{
    BgpPeer, BgpPeerMetadata, BgpPeerSpec, Config, ConfigMetadata, ConfigSpec, EntityRule,
    HostEndpoint, HostEndpointMetadata, HostEndpointSpec, IpPool, IpPoolMetadata, IpPoolSpec,
    Node, NodeMetadata, NodeSpec, Policy, PolicyMetadata, PolicySpec, Port, Profile,
    ProfileMetadata, ProfileSpec, Rule, RuleAction, Tier, TierMetadata, TierSpec,
    WorkloadEndpoint, WorkloadEndpointMetadata, WorkloadEndpointSpec,
};

pub fn tier(name: &str, order: f64) -> Tier {
    Tier::new(TierMetadata::new(name), TierSpec { order: Some(order) })
}

pub fn node(name: &str) -> Node {
    Node::new(NodeMetadata::new(name), NodeSpec::default())
}

/// A policy allowing TCP to `port` from anywhere.
pub fn policy(tier: &str, name: &str, port: u16) -> Policy {
    let mut allow = Rule::new(RuleAction::Allow);
    allow.protocol = Some("tcp".into());
    allow.destination = EntityRule {
        ports: vec![Port::Number(port)],
        ..EntityRule::default()
    };
    Policy::new(
        PolicyMetadata::new(tier, name),
        PolicySpec {
            order: Some(10.0),
            selector: "role == 'web'".into(),
            ingress: vec![allow],
            ..PolicySpec::default()
        },
    )
}

pub fn profile(name: &str) -> Profile {
    let mut metadata = ProfileMetadata::new(name);
    metadata.labels.insert("team".into(), "net".into());
    metadata.tags.push(name.to_string());
    Profile::new(
        metadata,
        ProfileSpec {
            ingress: vec![Rule::new(RuleAction::Allow)],
            egress: vec![Rule::new(RuleAction::Allow)],
        },
    )
}

pub fn workload_endpoint(node: &str, workload: &str, name: &str) -> WorkloadEndpoint {
    let mut metadata = WorkloadEndpointMetadata::new(node, "k8s", workload, name);
    metadata.labels.insert("app".into(), "web".into());
    WorkloadEndpoint::new(
        metadata,
        WorkloadEndpointSpec {
            interface_name: "cali0123".into(),
            ip_networks: vec!["10.0.0.5/32".into()],
            profiles: vec!["default".into()],
            ..WorkloadEndpointSpec::default()
        },
    )
}

pub fn host_endpoint(node: &str, name: &str) -> HostEndpoint {
    HostEndpoint::new(
        HostEndpointMetadata::new(node, name),
        HostEndpointSpec {
            interface_name: "eth0".into(),
            ..HostEndpointSpec::default()
        },
    )
}

pub fn bgp_peer(peer_ip: &str, as_number: u32) -> BgpPeer {
    BgpPeer::new(
        BgpPeerMetadata::global(peer_ip),
        BgpPeerSpec {
            as_number: Some(as_number),
        },
    )
}

pub fn ip_pool(cidr: &str) -> IpPool {
    IpPool::new(
        IpPoolMetadata::new(cidr),
        IpPoolSpec {
            nat_outgoing: true,
            ..IpPoolSpec::default()
        },
    )
}

pub fn config(name: &str, value: &str) -> Config {
    Config::new(ConfigMetadata::global(name), ConfigSpec::new(value))
}
