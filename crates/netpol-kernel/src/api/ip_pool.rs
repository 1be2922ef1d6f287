use super::{ResourceKind, api_object};
use crate::error::ValidationError;
use crate::validation::{Validate, validate_network};
use ipnetwork::IpNetwork;
use serde::{Deserialize, Serialize};

/// Smallest pools the allocator hands out blocks from.
const MIN_V4_PREFIX_LEN: u8 = 26;
const MIN_V6_PREFIX_LEN: u8 = 122;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IpPoolMetadata {
    pub cidr: String,
}

impl IpPoolMetadata {
    pub fn new(cidr: impl Into<String>) -> Self {
        Self { cidr: cidr.into() }
    }

    /// The pool's network, if `cidr` parses.
    pub fn network(&self) -> Option<IpNetwork> {
        self.cidr.parse().ok()
    }
}

impl Validate for IpPoolMetadata {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_network("cidr", &self.cidr)?;
        if let Some(cidr) = self.network() {
            let min = if cidr.is_ipv4() {
                MIN_V4_PREFIX_LEN
            } else {
                MIN_V6_PREFIX_LEN
            };
            if cidr.prefix() > min {
                return Err(ValidationError::new(
                    "cidr",
                    format!("pool '{cidr}' is smaller than /{min}"),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IpipConfig {
    pub enabled: bool,
    /// `always`, `cross-subnet`, or empty for `always`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub mode: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IpPoolSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipip: Option<IpipConfig>,
    pub nat_outgoing: bool,
    pub disabled: bool,
}

impl Validate for IpPoolSpec {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(ipip) = &self.ipip {
            match ipip.mode.as_str() {
                "" | "always" | "cross-subnet" => {}
                other => {
                    return Err(ValidationError::new(
                        "ipip.mode",
                        format!("unknown mode '{other}', expected 'always' or 'cross-subnet'"),
                    ));
                }
            }
        }
        Ok(())
    }
}

api_object!(
    /// Range of addresses workloads are assigned from.
    IpPool,
    ResourceKind::IpPool,
    IpPoolMetadata,
    IpPoolSpec,
    check = check_family
);

impl IpPool {
    /// IPIP tunnelling only applies to IPv4 pools.
    fn check_family(&self) -> Result<(), ValidationError> {
        let ipip_on = self.spec.ipip.as_ref().is_some_and(|i| i.enabled);
        match self.metadata.network() {
            Some(cidr) if ipip_on && !cidr.is_ipv4() => Err(ValidationError::new(
                "spec.ipip",
                "IPIP is only supported on IPv4 pools",
            )),
            _ => Ok(()),
        }
    }
}
