//! Error taxonomy shared by the gateway, the converters and every backend.
//!
//! The kinds mirror the order in which a request is processed:
//!
//! 1. [`ValidationError`] — the object or metadata is malformed; nothing has
//!    been converted or written yet.
//! 2. [`ConversionError`] — the object could not be mapped to a key/value
//!    pair, or a stored value could not be mapped back.
//! 3. [`DatastoreError`] — the backend refused or failed the operation.
//!
//! [`ClientError`] is what callers of the gateway see.  Identity conflicts
//! reported by the datastore surface as [`ClientError::AlreadyExists`] /
//! [`ClientError::NotFound`]; everything else the datastore reports is
//! wrapped in [`ClientError::Backend`].

use crate::api::ResourceKind;
use crate::model::Key;
use std::fmt;
use thiserror::Error;

// ─────────────────────────────────────────────────────────────────────────────
// Validation
// ─────────────────────────────────────────────────────────────────────────────

/// A field of an object or metadata failed a schema rule.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid value for '{field}': {reason}")]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `spec.ingress[0].action`.
    pub field: String,
    /// Human-readable description of the broken rule.
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Prefix the field path, used when validating nested structures.
    pub fn nested(mut self, parent: &str) -> Self {
        self.field = format!("{parent}.{}", self.field);
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversion
// ─────────────────────────────────────────────────────────────────────────────

/// Which way a conversion was heading when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionDirection {
    /// API object or metadata → key / key-value pair / selector.
    ToBackend,
    /// Stored key-value pair → API object.
    FromBackend,
}

impl fmt::Display for ConversionDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionDirection::ToBackend => f.write_str("to datastore form"),
            ConversionDirection::FromBackend => f.write_str("from datastore form"),
        }
    }
}

/// Translation between an API object and its key/value form failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cannot convert {kind} {direction}: {reason}")]
pub struct ConversionError {
    pub kind: ResourceKind,
    pub direction: ConversionDirection,
    pub reason: String,
}

impl ConversionError {
    /// The object or metadata cannot be turned into a key/value pair.
    pub fn to_backend(kind: ResourceKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            direction: ConversionDirection::ToBackend,
            reason: reason.into(),
        }
    }

    /// A stored key/value pair cannot be turned back into an object.
    pub fn from_backend(kind: ResourceKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            direction: ConversionDirection::FromBackend,
            reason: reason.into(),
        }
    }

    /// A required identity field was left empty.
    pub fn missing_field(kind: ResourceKind, field: &str) -> Self {
        Self::to_backend(kind, format!("missing required identity field '{field}'"))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Datastore
// ─────────────────────────────────────────────────────────────────────────────

/// Failure reported by a [`Backend`](crate::backend::Backend).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum DatastoreError {
    /// `create` found the key already present.
    #[error("resource already exists: {0}")]
    ResourceAlreadyExists(Key),

    /// `update`, `delete` or `get` found no value under the key.
    #[error("resource does not exist: {0}")]
    ResourceDoesNotExist(Key),

    /// The datastore could not be reached.
    #[error("datastore unavailable: {0}")]
    Unavailable(String),

    /// Any other store-level failure (timeout, corruption, quota, …).
    #[error("datastore error: {0}")]
    Other(String),
}

// ─────────────────────────────────────────────────────────────────────────────
// Client
// ─────────────────────────────────────────────────────────────────────────────

/// Outcome of a resource gateway operation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error("resource already exists: {0}")]
    AlreadyExists(Key),

    #[error("resource does not exist: {0}")]
    NotFound(Key),

    #[error(transparent)]
    Backend(DatastoreError),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, ClientError::AlreadyExists(_))
    }
}

impl From<DatastoreError> for ClientError {
    fn from(err: DatastoreError) -> Self {
        match err {
            DatastoreError::ResourceAlreadyExists(key) => ClientError::AlreadyExists(key),
            DatastoreError::ResourceDoesNotExist(key) => ClientError::NotFound(key),
            other => ClientError::Backend(other),
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
