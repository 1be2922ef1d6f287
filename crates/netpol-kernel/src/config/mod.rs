//! Configuration loading
//!
//! Thin layer over the `config` crate used by the gateway binary and by
//! [`ClientConfig`] loading.
//!
//! ## Features
//!
//! - Environment variable substitution (`${VAR}` and `$VAR` syntax)
//! - Environment sources: `PREFIX_FIELD`, with `__` for nesting
//!
//! Config files are parsed by [`ClientConfig::from_bytes`], not by the
//! `config` crate, which lowercases keys and would lose camelCase fields.

pub mod client;

pub use client::{
    CLIENT_CONFIG_KIND, ClientConfig, ClientConfigSpec, DatastoreType, load_client_config,
};

use config::{Config as Cfg, Environment};
use regex::Regex;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Configuration loading error
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parsing error: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for config operations
pub type ConfigResult<T> = Result<T, ConfigError>;

static BRACED_VAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("braced variable pattern is valid")
});

static SIMPLE_VAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$([A-Za-z_][A-Za-z0-9_]*)\b").expect("simple variable pattern is valid")
});

/// Substitute environment variables in a string
///
/// `${VAR_NAME}` is replaced first, then bare `$VAR_NAME`.  Unknown variables
/// are left as written.
pub fn substitute_env_vars(content: &str) -> String {
    substitute_with(content, |name| std::env::var(name).ok())
}

fn substitute_with(content: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let braced = BRACED_VAR_RE.replace_all(content, |caps: &regex::Captures| {
        lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
    });
    SIMPLE_VAR_RE
        .replace_all(&braced, |caps: &regex::Captures| {
            lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Load configuration from `PREFIX_*` variables
///
/// Reads `vars` when given, otherwise the process environment.  For a field
/// `listen_addr` and prefix `NETPOL` the variable is `NETPOL_LISTEN_ADDR`;
/// nested fields use `__`.
pub fn from_env_source<T>(
    env_prefix: &str,
    vars: Option<HashMap<String, String>>,
) -> ConfigResult<T>
where
    T: DeserializeOwned,
{
    let config = Cfg::builder()
        .add_source(environment(env_prefix, vars))
        .build()
        .map_err(|e| ConfigError::Parse(e.to_string()))?;

    config
        .try_deserialize()
        .map_err(|e| ConfigError::Serialization(e.to_string()))
}

fn environment(prefix: &str, vars: Option<HashMap<String, String>>) -> Environment {
    Environment::with_prefix(prefix)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .source(vars)
}
