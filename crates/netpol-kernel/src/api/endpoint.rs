//! Workload and host endpoints.

use super::{ResourceKind, api_object};
use crate::error::ValidationError;
use crate::validation::{Validate, validate_cidr, validate_ip, validate_labels, validate_name};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;

static MAC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9a-fA-F]{2}[:-]){5}[0-9a-fA-F]{2}$").expect("mac pattern is a valid regex")
});

static INTERFACE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9_.\-]{1,15}$").expect("interface pattern is a valid regex")
});

fn validate_interface(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || INTERFACE_RE.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new(
            "interfaceName",
            format!("'{value}' is not a valid interface name"),
        ))
    }
}

fn validate_profiles(profiles: &[String]) -> Result<(), ValidationError> {
    for (i, profile) in profiles.iter().enumerate() {
        validate_name(&format!("profiles[{i}]"), profile)?;
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// WorkloadEndpoint
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkloadEndpointMetadata {
    pub node: String,
    pub orchestrator: String,
    pub workload: String,
    pub name: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

impl WorkloadEndpointMetadata {
    pub fn new(
        node: impl Into<String>,
        orchestrator: impl Into<String>,
        workload: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            node: node.into(),
            orchestrator: orchestrator.into(),
            workload: workload.into(),
            name: name.into(),
            labels: BTreeMap::new(),
        }
    }
}

impl Validate for WorkloadEndpointMetadata {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_name("node", &self.node)?;
        validate_name("orchestrator", &self.orchestrator)?;
        validate_name("workload", &self.workload)?;
        validate_name("name", &self.name)?;
        validate_labels("labels", &self.labels)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkloadEndpointSpec {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub interface_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub mac: String,
    #[serde(rename = "ipNetworks", skip_serializing_if = "Vec::is_empty")]
    pub ip_networks: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub profiles: Vec<String>,
}

impl Validate for WorkloadEndpointSpec {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_interface(&self.interface_name)?;
        if !self.mac.is_empty() && !MAC_RE.is_match(&self.mac) {
            return Err(ValidationError::new(
                "mac",
                format!("'{}' is not a MAC address", self.mac),
            ));
        }
        for (i, net) in self.ip_networks.iter().enumerate() {
            validate_cidr(&format!("ipNetworks[{i}]"), net)?;
        }
        validate_profiles(&self.profiles)
    }
}

api_object!(
    /// Network interface of a workload (container or VM) on a node.
    WorkloadEndpoint,
    ResourceKind::WorkloadEndpoint,
    WorkloadEndpointMetadata,
    WorkloadEndpointSpec
);

// ─────────────────────────────────────────────────────────────────────────────
// HostEndpoint
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HostEndpointMetadata {
    pub node: String,
    pub name: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

impl HostEndpointMetadata {
    pub fn new(node: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            name: name.into(),
            labels: BTreeMap::new(),
        }
    }
}

impl Validate for HostEndpointMetadata {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_name("node", &self.node)?;
        validate_name("name", &self.name)?;
        validate_labels("labels", &self.labels)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HostEndpointSpec {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub interface_name: String,
    #[serde(rename = "expectedIPs", skip_serializing_if = "Vec::is_empty")]
    pub expected_ips: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub profiles: Vec<String>,
}

impl Validate for HostEndpointSpec {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_interface(&self.interface_name)?;
        for (i, ip) in self.expected_ips.iter().enumerate() {
            validate_ip(&format!("expectedIPs[{i}]"), ip)?;
        }
        validate_profiles(&self.profiles)
    }
}

api_object!(
    /// Network interface of a host itself.
    HostEndpoint,
    ResourceKind::HostEndpoint,
    HostEndpointMetadata,
    HostEndpointSpec
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workload_endpoint_json() {
        let wep: WorkloadEndpoint = serde_json::from_str(
            r#"{
                "metadata": {"node": "n1", "orchestrator": "k8s", "workload": "ns.pod",
                             "name": "eth0", "labels": {"app": "web"}},
                "spec": {"interfaceName": "cali1234", "mac": "ee:ee:ee:ee:ee:ee",
                         "ipNetworks": ["10.1.0.4/32"], "profiles": ["ns.default"]}
            }"#,
        )
        .unwrap();
        assert_eq!(wep.metadata.labels["app"], "web");
        assert!(wep.validate().is_ok());
    }

    #[test]
    fn bad_mac_is_rejected() {
        let mut wep = WorkloadEndpoint::new(
            WorkloadEndpointMetadata::new("n1", "k8s", "w", "eth0"),
            WorkloadEndpointSpec::default(),
        );
        wep.spec.mac = "zz:zz".into();
        assert_eq!(wep.validate().unwrap_err().field, "spec.mac");
    }

    #[test]
    fn host_endpoint_expected_ips() {
        let mut hep = HostEndpoint::new(
            HostEndpointMetadata::new("n1", "eth0"),
            HostEndpointSpec {
                interface_name: "eth0".into(),
                expected_ips: vec!["192.168.0.1".into()],
                profiles: Vec::new(),
            },
        );
        assert!(hep.validate().is_ok());
        let json = serde_json::to_value(&hep).unwrap();
        assert_eq!(json["spec"]["expectedIPs"][0], "192.168.0.1");

        hep.spec.expected_ips.push("192.168.0.0/24".into());
        assert_eq!(hep.validate().unwrap_err().field, "spec.expectedIPs[1]");
    }
}
