//! Typed resource interfaces: one converter bound to the gateway.

use super::Client;
use crate::converters::{
    BgpPeerConverter, ConfigConverter, HostEndpointConverter, IpPoolConverter, NodeConverter,
    PolicyConverter, ProfileConverter, TierConverter, WorkloadEndpointConverter,
};
use netpol_kernel::{ClientResult, MetadataOf, ResourceConverter, ResourceList};

/// Kind-specific view of a [`Client`], e.g. `client.tiers().create(&tier)`.
///
/// Pure forwarding; construction is free and never fails.
#[derive(Debug)]
pub struct ResourceInterface<'a, C> {
    client: &'a Client,
    converter: C,
}

impl<'a, C: ResourceConverter> ResourceInterface<'a, C> {
    pub fn new(client: &'a Client, converter: C) -> Self {
        Self { client, converter }
    }

    pub async fn create(&self, resource: &C::Resource) -> ClientResult<C::Resource> {
        self.client.create(&self.converter, resource).await
    }

    pub async fn update(&self, resource: &C::Resource) -> ClientResult<C::Resource> {
        self.client.update(&self.converter, resource).await
    }

    pub async fn apply(&self, resource: &C::Resource) -> ClientResult<C::Resource> {
        self.client.apply(&self.converter, resource).await
    }

    pub async fn delete(&self, metadata: &MetadataOf<C>) -> ClientResult<()> {
        self.client.delete(&self.converter, metadata).await
    }

    pub async fn get(&self, metadata: &MetadataOf<C>) -> ClientResult<C::Resource> {
        self.client.get(&self.converter, metadata).await
    }

    pub async fn list(&self, metadata: &MetadataOf<C>) -> ClientResult<ResourceList<C::Resource>> {
        self.client.list(&self.converter, metadata).await
    }
}

impl Client {
    pub fn tiers(&self) -> ResourceInterface<'_, TierConverter> {
        ResourceInterface::new(self, TierConverter)
    }

    pub fn nodes(&self) -> ResourceInterface<'_, NodeConverter> {
        ResourceInterface::new(self, NodeConverter)
    }

    pub fn policies(&self) -> ResourceInterface<'_, PolicyConverter> {
        ResourceInterface::new(self, PolicyConverter)
    }

    pub fn workload_endpoints(&self) -> ResourceInterface<'_, WorkloadEndpointConverter> {
        ResourceInterface::new(self, WorkloadEndpointConverter)
    }

    pub fn host_endpoints(&self) -> ResourceInterface<'_, HostEndpointConverter> {
        ResourceInterface::new(self, HostEndpointConverter)
    }

    pub fn profiles(&self) -> ResourceInterface<'_, ProfileConverter> {
        ResourceInterface::new(self, ProfileConverter)
    }

    pub fn bgp_peers(&self) -> ResourceInterface<'_, BgpPeerConverter> {
        ResourceInterface::new(self, BgpPeerConverter)
    }

    pub fn ip_pools(&self) -> ResourceInterface<'_, IpPoolConverter> {
        ResourceInterface::new(self, IpPoolConverter)
    }

    pub fn config(&self) -> ResourceInterface<'_, ConfigConverter> {
        ResourceInterface::new(self, ConfigConverter)
    }
}
