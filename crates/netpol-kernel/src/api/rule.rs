//! Ingress/egress rules shared by policies and profiles.

use crate::error::ValidationError;
use crate::validation::{Validate, validate_cidr};
use serde::{Deserialize, Serialize};
use std::fmt;

const PROTOCOLS: [&str; 6] = ["tcp", "udp", "icmp", "icmpv6", "sctp", "udplite"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleAction {
    #[default]
    Allow,
    Deny,
    Log,
    Pass,
}

/// A single port or an inclusive `lo:hi` range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Port {
    Number(u16),
    Range(String),
}

impl Port {
    /// Inclusive bounds, or `None` when the value is malformed.
    pub fn bounds(&self) -> Option<(u16, u16)> {
        match self {
            Port::Number(0) => None,
            Port::Number(n) => Some((*n, *n)),
            Port::Range(s) => {
                let (lo, hi) = match s.split_once(':') {
                    Some((lo, hi)) => (lo.trim().parse().ok()?, hi.trim().parse().ok()?),
                    None => {
                        let n: u16 = s.trim().parse().ok()?;
                        (n, n)
                    }
                };
                (lo >= 1 && lo <= hi).then_some((lo, hi))
            }
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Port::Number(n) => write!(f, "{n}"),
            Port::Range(s) => f.write_str(s),
        }
    }
}

/// Match criteria for one side of a rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntityRule {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nets: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<Port>,
}

impl Validate for EntityRule {
    fn validate(&self) -> Result<(), ValidationError> {
        for (i, net) in self.nets.iter().enumerate() {
            validate_cidr(&format!("nets[{i}]"), net)?;
        }
        for (i, port) in self.ports.iter().enumerate() {
            if port.bounds().is_none() {
                return Err(ValidationError::new(
                    format!("ports[{i}]"),
                    format!("'{port}' is not a port in 1..65535 or a lo:hi range"),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Rule {
    pub action: RuleAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    pub source: EntityRule,
    pub destination: EntityRule,
}

impl Rule {
    pub fn new(action: RuleAction) -> Self {
        Self {
            action,
            ..Self::default()
        }
    }

    fn has_ports(&self) -> bool {
        !self.source.ports.is_empty() || !self.destination.ports.is_empty()
    }
}

impl Validate for Rule {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(protocol) = &self.protocol {
            if !PROTOCOLS.contains(&protocol.as_str()) {
                return Err(ValidationError::new(
                    "protocol",
                    format!("unknown protocol '{protocol}'"),
                ));
            }
            let takes_ports = matches!(protocol.as_str(), "tcp" | "udp" | "sctp" | "udplite");
            if self.has_ports() && !takes_ports {
                return Err(ValidationError::new(
                    "protocol",
                    format!("ports are not meaningful for protocol '{protocol}'"),
                ));
            }
        }
        self.source.validate().map_err(|e| e.nested("source"))?;
        self.destination
            .validate()
            .map_err(|e| e.nested("destination"))
    }
}

/// Validate an ingress/egress list, reporting `field[i].…` on failure.
pub(crate) fn validate_rules(field: &str, rules: &[Rule]) -> Result<(), ValidationError> {
    for (i, rule) in rules.iter().enumerate() {
        rule.validate().map_err(|e| e.nested(&format!("{field}[{i}]")))?;
    }
    Ok(())
}
