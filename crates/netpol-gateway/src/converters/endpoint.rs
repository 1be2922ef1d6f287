use super::{decode, encode, identity, require, wildcard};
use netpol_kernel::api::{
    HostEndpoint, HostEndpointMetadata, HostEndpointSpec, WorkloadEndpoint,
    WorkloadEndpointMetadata, WorkloadEndpointSpec,
};
use netpol_kernel::{ConversionError, Key, KeyValue, ListSelector, Resource, ResourceConverter};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stored half of an endpoint: labels travel with the spec.
#[derive(Debug, Serialize, Deserialize)]
struct StoredEndpoint<S> {
    #[serde(default)]
    labels: BTreeMap<String, String>,
    spec: S,
}

// ─────────────────────────────────────────────────────────────────────────────
// WorkloadEndpoint
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default)]
pub struct WorkloadEndpointConverter;

impl ResourceConverter for WorkloadEndpointConverter {
    type Resource = WorkloadEndpoint;

    fn to_key_value(&self, wep: &WorkloadEndpoint) -> Result<KeyValue, ConversionError> {
        let key = self.to_key(&wep.metadata)?;
        let stored = StoredEndpoint {
            labels: wep.metadata.labels.clone(),
            spec: wep.spec.clone(),
        };
        Ok(KeyValue::new(key, encode(WorkloadEndpoint::KIND, &stored)?))
    }

    fn from_key_value(&self, kv: &KeyValue) -> Result<WorkloadEndpoint, ConversionError> {
        let [node, orchestrator, workload, name] = identity(WorkloadEndpoint::KIND, &kv.key)?;
        let stored: StoredEndpoint<WorkloadEndpointSpec> = decode(WorkloadEndpoint::KIND, kv)?;
        Ok(WorkloadEndpoint::new(
            WorkloadEndpointMetadata {
                node,
                orchestrator,
                workload,
                name,
                labels: stored.labels,
            },
            stored.spec,
        ))
    }

    fn to_key(&self, metadata: &WorkloadEndpointMetadata) -> Result<Key, ConversionError> {
        let kind = WorkloadEndpoint::KIND;
        Ok(Key::new(
            kind,
            [
                require(kind, "node", &metadata.node)?,
                require(kind, "orchestrator", &metadata.orchestrator)?,
                require(kind, "workload", &metadata.workload)?,
                require(kind, "name", &metadata.name)?,
            ],
        ))
    }

    fn to_list_selector(&self, metadata: &WorkloadEndpointMetadata) -> ListSelector {
        ListSelector::new(
            WorkloadEndpoint::KIND,
            vec![
                wildcard(&metadata.node),
                wildcard(&metadata.orchestrator),
                wildcard(&metadata.workload),
                wildcard(&metadata.name),
            ],
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// HostEndpoint
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default)]
pub struct HostEndpointConverter;

impl ResourceConverter for HostEndpointConverter {
    type Resource = HostEndpoint;

    fn to_key_value(&self, hep: &HostEndpoint) -> Result<KeyValue, ConversionError> {
        let key = self.to_key(&hep.metadata)?;
        let stored = StoredEndpoint {
            labels: hep.metadata.labels.clone(),
            spec: hep.spec.clone(),
        };
        Ok(KeyValue::new(key, encode(HostEndpoint::KIND, &stored)?))
    }

    fn from_key_value(&self, kv: &KeyValue) -> Result<HostEndpoint, ConversionError> {
        let [node, name] = identity(HostEndpoint::KIND, &kv.key)?;
        let stored: StoredEndpoint<HostEndpointSpec> = decode(HostEndpoint::KIND, kv)?;
        Ok(HostEndpoint::new(
            HostEndpointMetadata {
                node,
                name,
                labels: stored.labels,
            },
            stored.spec,
        ))
    }

    fn to_key(&self, metadata: &HostEndpointMetadata) -> Result<Key, ConversionError> {
        let kind = HostEndpoint::KIND;
        Ok(Key::new(
            kind,
            [
                require(kind, "node", &metadata.node)?,
                require(kind, "name", &metadata.name)?,
            ],
        ))
    }

    fn to_list_selector(&self, metadata: &HostEndpointMetadata) -> ListSelector {
        ListSelector::new(
            HostEndpoint::KIND,
            vec![wildcard(&metadata.node), wildcard(&metadata.name)],
        )
    }
}
