//! Schema validation run before any conversion or datastore access.
//!
//! Validation checks *format* only.  Whether metadata is complete enough to
//! name a single object is decided by the converter, because the same
//! metadata type is used both to name one object and to filter many.

use crate::api::{API_VERSION, ResourceKind};
use crate::error::ValidationError;
use ipnetwork::IpNetwork;
use regex::Regex;
use std::collections::BTreeMap;
use std::net::IpAddr;
use std::sync::LazyLock;

const MAX_NAME_LEN: usize = 253;
const MAX_LABEL_VALUE_LEN: usize = 63;

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9_.\-]*$").expect("name pattern is a valid regex")
});

static LABEL_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-zA-Z0-9][a-zA-Z0-9.\-]*/)?[a-zA-Z0-9][a-zA-Z0-9_.\-]*$")
        .expect("label key pattern is a valid regex")
});

static LABEL_VALUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9_.\-]*$").expect("label value pattern is a valid regex")
});

/// Anything that can check its own schema.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Single entry point used by the gateway.
pub fn validate<T: Validate + ?Sized>(value: &T) -> Result<(), ValidationError> {
    value.validate()
}

// ─────────────────────────────────────────────────────────────────────────────
// Rule helpers
// ─────────────────────────────────────────────────────────────────────────────

/// `apiVersion` and `kind` may be omitted but must be right when present.
pub fn validate_type_meta(
    kind: ResourceKind,
    api_version: &str,
    kind_field: &str,
) -> Result<(), ValidationError> {
    if !api_version.is_empty() && api_version != API_VERSION {
        return Err(ValidationError::new(
            "apiVersion",
            format!("unsupported API version '{api_version}', expected '{API_VERSION}'"),
        ));
    }
    if !kind_field.is_empty() && kind_field != kind.as_str() {
        return Err(ValidationError::new(
            "kind",
            format!("expected kind '{kind}', got '{kind_field}'"),
        ));
    }
    Ok(())
}

/// Resource names. Empty is allowed (wildcard / not yet set).
pub fn validate_name(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    if value.len() > MAX_NAME_LEN {
        return Err(ValidationError::new(
            field,
            format!("must be at most {MAX_NAME_LEN} characters"),
        ));
    }
    if !NAME_RE.is_match(value) {
        return Err(ValidationError::new(
            field,
            format!(
                "'{value}' may only contain alphanumerics, '.', '_' and '-', \
                 and must start with an alphanumeric"
            ),
        ));
    }
    Ok(())
}

pub fn validate_labels(
    field: &str,
    labels: &BTreeMap<String, String>,
) -> Result<(), ValidationError> {
    for (key, value) in labels {
        if !LABEL_KEY_RE.is_match(key) {
            return Err(ValidationError::new(
                format!("{field}.{key}"),
                "invalid label key",
            ));
        }
        if value.len() > MAX_LABEL_VALUE_LEN || !LABEL_VALUE_RE.is_match(value) {
            return Err(ValidationError::new(
                format!("{field}.{key}"),
                format!("invalid label value '{value}'"),
            ));
        }
    }
    Ok(())
}

/// Parse a CIDR; a bare address is a host network (`/32` or `/128`).
pub fn parse_cidr(field: &str, value: &str) -> Result<IpNetwork, ValidationError> {
    value
        .parse::<IpNetwork>()
        .map_err(|e| ValidationError::new(field, format!("'{value}' is not a CIDR: {e}")))
}

/// CIDR or bare address.  Empty is allowed.
pub fn validate_cidr(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    parse_cidr(field, value).map(|_| ())
}

/// A network written exactly as it prints: no host bits, shortest form.
/// Used for fields that become part of an object's identity.  Empty is
/// allowed.
pub fn validate_network(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    let parsed = parse_cidr(field, value)?;
    let network = IpNetwork::new(parsed.network(), parsed.prefix())
        .map_err(|e| ValidationError::new(field, e.to_string()))?;
    if network.to_string() != value {
        return Err(ValidationError::new(
            field,
            format!("'{value}' is not a network address, expected '{network}'"),
        ));
    }
    Ok(())
}

/// Plain IP address.  Empty is allowed.
pub fn validate_ip(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    value
        .parse::<IpAddr>()
        .map(|_| ())
        .map_err(|_| ValidationError::new(field, format!("'{value}' is not an IP address")))
}

/// Plain IP address in its shortest text form, e.g. `fd00::1` but not
/// `fd00:0:0::1`.  Empty is allowed.
pub fn validate_canonical_ip(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    let addr = value
        .parse::<IpAddr>()
        .map_err(|_| ValidationError::new(field, format!("'{value}' is not an IP address")))?;
    if addr.to_string() != value {
        return Err(ValidationError::new(
            field,
            format!("'{value}' is not in canonical form, expected '{addr}'"),
        ));
    }
    Ok(())
}

pub fn validate_as_number(field: &str, value: Option<u32>) -> Result<(), ValidationError> {
    match value {
        Some(0) => Err(ValidationError::new(field, "AS number must be non-zero")),
        _ => Ok(()),
    }
}

pub const SCOPE_GLOBAL: &str = "global";
pub const SCOPE_NODE: &str = "node";

/// `scope` is `global`, `node` or empty; a global scope never names a node.
pub fn validate_scope(scope: &str, node: &str) -> Result<(), ValidationError> {
    match scope {
        "" | SCOPE_NODE => Ok(()),
        SCOPE_GLOBAL if node.is_empty() => Ok(()),
        SCOPE_GLOBAL => Err(ValidationError::new(
            "node",
            "must be empty when scope is 'global'",
        )),
        other => Err(ValidationError::new(
            "scope",
            format!("unknown scope '{other}', expected 'global' or 'node'"),
        )),
    }
}
