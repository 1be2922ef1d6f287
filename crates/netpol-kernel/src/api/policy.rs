use super::rule::{Rule, validate_rules};
use super::{ResourceKind, api_object};
use crate::error::ValidationError;
use crate::validation::{Validate, validate_name};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PolicyMetadata {
    /// Owning tier.  Empty names the default tier for single-object
    /// operations and matches every tier when listing.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tier: String,
    pub name: String,
}

impl PolicyMetadata {
    pub fn new(tier: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            tier: tier.into(),
            name: name.into(),
        }
    }
}

impl Validate for PolicyMetadata {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_name("tier", &self.tier)?;
        validate_name("name", &self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PolicySpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<f64>,
    /// Endpoint selector expression; empty selects nothing.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub selector: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ingress: Vec<Rule>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub egress: Vec<Rule>,
    pub do_not_track: bool,
}

impl Validate for PolicySpec {
    fn validate(&self) -> Result<(), ValidationError> {
        if matches!(self.order, Some(o) if !o.is_finite()) {
            return Err(ValidationError::new("order", "must be a finite number"));
        }
        validate_rules("ingress", &self.ingress)?;
        validate_rules("egress", &self.egress)
    }
}

api_object!(
    /// Ordered set of ingress/egress rules applied to selected endpoints.
    Policy,
    ResourceKind::Policy,
    PolicyMetadata,
    PolicySpec
);
