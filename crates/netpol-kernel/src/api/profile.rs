use super::rule::{Rule, validate_rules};
use super::{ResourceKind, api_object};
use crate::error::ValidationError;
use crate::validation::{Validate, validate_labels, validate_name};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileMetadata {
    pub name: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl ProfileMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Validate for ProfileMetadata {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_name("name", &self.name)?;
        validate_labels("labels", &self.labels)?;
        for (i, tag) in self.tags.iter().enumerate() {
            if tag.is_empty() {
                return Err(ValidationError::new(format!("tags[{i}]"), "must not be empty"));
            }
            validate_name(&format!("tags[{i}]"), tag)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileSpec {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ingress: Vec<Rule>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub egress: Vec<Rule>,
}

impl Validate for ProfileSpec {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_rules("ingress", &self.ingress)?;
        validate_rules("egress", &self.egress)
    }
}

api_object!(
    /// Named rule set and labels that endpoints inherit by reference.
    Profile,
    ResourceKind::Profile,
    ProfileMetadata,
    ProfileSpec
);
