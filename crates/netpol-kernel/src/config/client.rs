//! Client configuration: which datastore the gateway talks to.
//!
//! A config file looks like:
//!
//! ```yaml
//! apiVersion: v1
//! kind: apiConfig
//! spec:
//!   datastoreType: memory
//! ```
//!
//! Without a file, the spec is read from `NETPOL_`-prefixed environment
//! variables (`NETPOL_DATASTORE_TYPE=memory`).

use super::{ConfigError, ConfigResult, from_env_source, substitute_env_vars};
use crate::api::API_VERSION;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Required `kind` of a client config file.
pub const CLIENT_CONFIG_KIND: &str = "apiConfig";

/// Prefix of the environment variables read by [`ClientConfig::from_environment`].
pub const ENV_PREFIX: &str = "NETPOL";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatastoreType {
    #[default]
    Memory,
}

impl fmt::Display for DatastoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatastoreType::Memory => f.write_str("memory"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ClientConfigSpec {
    #[serde(default)]
    pub datastore_type: DatastoreType,
}

/// Environment view of the spec.  The `NETPOL_` prefix is shared with server
/// settings, so unrelated variables are ignored here.
#[derive(Debug, Deserialize)]
struct EnvSpec {
    #[serde(default)]
    datastore_type: DatastoreType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ClientConfig {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub spec: ClientConfigSpec,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(ClientConfigSpec::default())
    }
}

impl ClientConfig {
    pub fn new(spec: ClientConfigSpec) -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: CLIENT_CONFIG_KIND.to_string(),
            spec,
        }
    }

    /// Parse YAML or JSON bytes.  Unknown fields are rejected and
    /// `apiVersion`/`kind` must be exactly `v1`/`apiConfig`.
    pub fn from_bytes(bytes: &[u8]) -> ConfigResult<Self> {
        let content = std::str::from_utf8(bytes)
            .map_err(|e| ConfigError::Parse(format!("config is not UTF-8: {e}")))?;
        let substituted = substitute_env_vars(content);
        let config: ClientConfig = serde_yaml::from_str(&substituted)
            .map_err(|e| ConfigError::Serialization(e.to_string()))?;

        if config.api_version != API_VERSION {
            return Err(ConfigError::Invalid(format!(
                "unknown apiVersion '{}'",
                config.api_version
            )));
        }
        if config.kind != CLIENT_CONFIG_KIND {
            return Err(ConfigError::Invalid(format!(
                "expected kind '{CLIENT_CONFIG_KIND}', got '{}'",
                config.kind
            )));
        }

        tracing::info!(
            datastore_type = %config.spec.datastore_type,
            "Loaded client config from data"
        );
        Ok(config)
    }

    /// Read the spec from `NETPOL_*` environment variables.
    pub fn from_environment() -> ConfigResult<Self> {
        Self::from_env_vars(None)
    }

    /// As [`from_environment`](Self::from_environment) with an explicit
    /// variable set instead of the process environment.
    pub fn from_env_vars(vars: Option<HashMap<String, String>>) -> ConfigResult<Self> {
        let env: EnvSpec = from_env_source(ENV_PREFIX, vars)?;
        tracing::info!(
            datastore_type = %env.datastore_type,
            "Loaded client config from environment"
        );
        Ok(Self::new(ClientConfigSpec {
            datastore_type: env.datastore_type,
        }))
    }
}

/// Load from `path` when given, otherwise from the environment.
pub fn load_client_config(path: Option<&str>) -> ConfigResult<ClientConfig> {
    match path.filter(|p| !p.is_empty()) {
        Some(path) => {
            let bytes = std::fs::read(path)?;
            ClientConfig::from_bytes(&bytes)
        }
        None => ClientConfig::from_environment(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn yaml_file_is_loaded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("client.yaml");
        fs::write(
            &path,
            "apiVersion: v1\nkind: apiConfig\nspec:\n  datastoreType: memory\n",
        )
        .unwrap();

        let config = load_client_config(path.to_str()).unwrap();
        assert_eq!(config.spec.datastore_type, DatastoreType::Memory);
    }

    #[test]
    fn json_is_accepted() {
        let config = ClientConfig::from_bytes(
            br#"{"apiVersion":"v1","kind":"apiConfig","spec":{"datastoreType":"memory"}}"#,
        )
        .unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn wrong_version_or_kind_is_rejected() {
        let err = ClientConfig::from_bytes(b"apiVersion: v2\nkind: apiConfig\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = ClientConfig::from_bytes(b"apiVersion: v1\nkind: tier\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = ClientConfig::from_bytes(b"kind: apiConfig\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn unknown_fields_and_datastores_are_rejected() {
        let err = ClientConfig::from_bytes(b"apiVersion: v1\nkind: apiConfig\nextra: 1\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Serialization(_)));

        let err = ClientConfig::from_bytes(
            b"apiVersion: v1\nkind: apiConfig\nspec:\n  datastoreType: etcdv2\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Serialization(_)));
    }

    #[test]
    fn environment_fallback() {
        let vars = HashMap::from([
            ("NETPOL_DATASTORE_TYPE".to_string(), "memory".to_string()),
            ("NETPOL_LISTEN_ADDR".to_string(), "0.0.0.0:8080".to_string()),
        ]);
        let config = ClientConfig::from_env_vars(Some(vars)).unwrap();
        assert_eq!(config.api_version, "v1");
        assert_eq!(config.kind, CLIENT_CONFIG_KIND);
        assert_eq!(config.spec.datastore_type, DatastoreType::Memory);

        let config = ClientConfig::from_env_vars(Some(HashMap::new())).unwrap();
        assert_eq!(config.spec.datastore_type, DatastoreType::Memory);
    }

    #[test]
    fn json_file_is_loaded_with_substitution() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("client.json");
        fs::write(
            &path,
            r#"{"apiVersion":"${NETPOL_TEST_UNSET_VERSION}","kind":"apiConfig"}"#,
        )
        .unwrap();

        // Unknown variables stay as written, so the version check sees them.
        let err = load_client_config(path.to_str()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        fs::write(&path, r#"{"apiVersion":"v1","kind":"apiConfig","spec":{}}"#).unwrap();
        let config = load_client_config(path.to_str()).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_client_config(Some("/nonexistent/client.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
