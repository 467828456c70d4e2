//! Dotted key paths into a settings tree.
//!
//! Settings are addressed the way editors address them: `linter-eslint.autofix.fixOnSave`
//! names the `fixOnSave` key of the `autofix` section of the `linter-eslint` namespace.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::error::{KeyshiftError, Result};

/// A parsed, non-empty dotted settings path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// Parse a dotted path. Empty paths and empty segments (`a..b`, `.a`) are rejected.
    pub fn parse(path: &str) -> Result<Self> {
        if path.is_empty() {
            return Err(invalid(path, "path is empty"));
        }

        let segments: Vec<String> = path.split('.').map(str::to_string).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(invalid(path, "path contains an empty segment"));
        }

        Ok(Self { segments })
    }

    /// Path segments, outermost first. Never empty.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Look this path up in a settings map.
    pub fn lookup<'a>(&self, map: &'a Map<String, Value>) -> Option<&'a Value> {
        lookup_segments(map, &self.segments)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl FromStr for KeyPath {
    type Err = KeyshiftError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Join a namespace and a namespace-relative key into a full path.
pub fn join(namespace: &str, key: &str) -> String {
    if namespace.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", namespace, key)
    }
}

/// Look up a namespace-relative key in a snapshot.
///
/// JSON `null` counts as absent, matching an unset setting.
pub fn lookup<'a>(snapshot: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    lookup_stored(snapshot, key).filter(|v| !v.is_null())
}

/// Look up a namespace-relative key in a snapshot, keeping stored `null`s.
///
/// Only a missing key is absent.
pub fn lookup_stored<'a>(snapshot: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    let segments: Vec<String> = key.split('.').map(str::to_string).collect();
    lookup_segments(snapshot, &segments)
}

fn lookup_segments<'a>(map: &'a Map<String, Value>, segments: &[String]) -> Option<&'a Value> {
    let (first, rest) = segments.split_first()?;
    let value = map.get(first)?;
    if rest.is_empty() {
        Some(value)
    } else {
        lookup_segments(value.as_object()?, rest)
    }
}

fn invalid(key: &str, reason: &str) -> KeyshiftError {
    KeyshiftError::InvalidKey {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
