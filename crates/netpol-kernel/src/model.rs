//! Backend-facing model: keys, key/value pairs and list selectors.
//!
//! A [`Key`] is a resource kind plus an ordered tuple of identity values.
//! Every key of a given kind has the same number of identity values, so a
//! [`ListSelector`] can express "match these positions, ignore the rest"
//! without knowing anything about the kind.

use crate::api::ResourceKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Root of every datastore path rendered by [`Key`]'s `Display`.
pub const KEY_PREFIX: &str = "/netpol/v1";

// ─────────────────────────────────────────────────────────────────────────────
// Key
// ─────────────────────────────────────────────────────────────────────────────

/// Names exactly one stored object.
///
/// Keys order by kind first and then lexicographically by identity, which is
/// also the enumeration order of the in-memory datastore.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Key {
    kind: ResourceKind,
    identity: Vec<String>,
}

impl Key {
    pub fn new<I, S>(kind: ResourceKind, identity: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind,
            identity: identity.into_iter().map(Into::into).collect(),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Identity values in the kind's fixed field order.
    pub fn identity(&self) -> &[String] {
        &self.identity
    }

    /// Datastore path, e.g. `/netpol/v1/policy/default/allow-dns`.
    pub fn path(&self) -> String {
        let mut path = format!("{KEY_PREFIX}/{}", self.kind);
        for part in &self.identity {
            path.push('/');
            path.push_str(part);
        }
        path
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// KeyValue
// ─────────────────────────────────────────────────────────────────────────────

/// The datastore's unit of storage.
///
/// `value` is opaque to the datastore; only the owning converter knows how to
/// decode it.  `revision` is assigned by the datastore on write and is `None`
/// on pairs that have not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: Key,
    pub value: Option<Vec<u8>>,
    pub revision: Option<u64>,
}

impl KeyValue {
    pub fn new(key: Key, value: Vec<u8>) -> Self {
        Self {
            key,
            value: Some(value),
            revision: None,
        }
    }

    /// A pair carrying only a key, as used for deletes.
    pub fn key_only(key: Key) -> Self {
        Self {
            key,
            value: None,
            revision: None,
        }
    }

    pub fn with_revision(mut self, revision: u64) -> Self {
        self.revision = Some(revision);
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ListSelector
// ─────────────────────────────────────────────────────────────────────────────

/// Filter derived from partial metadata; matches zero or more keys of one kind.
///
/// Position `i` of `identity` constrains position `i` of a key's identity:
/// `Some(v)` requires equality, `None` matches anything.  Positions beyond the
/// end of `identity` are unconstrained, so an empty selector matches every
/// key of the kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSelector {
    kind: ResourceKind,
    identity: Vec<Option<String>>,
}

impl ListSelector {
    pub fn new(kind: ResourceKind, identity: Vec<Option<String>>) -> Self {
        Self { kind, identity }
    }

    /// Selector matching every key of `kind`.
    pub fn all(kind: ResourceKind) -> Self {
        Self {
            kind,
            identity: Vec::new(),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn identity(&self) -> &[Option<String>] {
        &self.identity
    }

    /// True when no identity position is constrained.
    pub fn is_match_all(&self) -> bool {
        self.identity.iter().all(Option::is_none)
    }

    pub fn matches(&self, key: &Key) -> bool {
        if key.kind != self.kind {
            return false;
        }
        self.identity.iter().enumerate().all(|(i, wanted)| {
            wanted
                .as_ref()
                .is_none_or(|value| key.identity.get(i) == Some(value))
        })
    }
}
