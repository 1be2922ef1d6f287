use super::{ResourceKind, api_object};
use crate::error::ValidationError;
use crate::validation::{Validate, validate_name};
use serde::{Deserialize, Serialize};

/// Name of the tier policies land in when they do not name one.
pub const DEFAULT_TIER: &str = "default";

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TierMetadata {
    pub name: String,
}

impl TierMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Validate for TierMetadata {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_name("name", &self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TierSpec {
    /// Lower orders are evaluated first; absent sorts last.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<f64>,
}

impl Validate for TierSpec {
    fn validate(&self) -> Result<(), ValidationError> {
        match self.order {
            Some(order) if !order.is_finite() => {
                Err(ValidationError::new("order", "must be a finite number"))
            }
            _ => Ok(()),
        }
    }
}

api_object!(
    /// Ordered group of policies.
    Tier,
    ResourceKind::Tier,
    TierMetadata,
    TierSpec
);
