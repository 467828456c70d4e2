use serde_json::{Map, Value};

use super::Snapshot;
use crate::error::{KeyshiftError, Result};
use crate::key::KeyPath;

/// A nested JSON object holding settings, addressed by dotted paths.
///
/// Shared by the in-memory and file-backed stores.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsTree {
    root: Map<String, Value>,
}

impl SettingsTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from a JSON value. The value must be an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(KeyshiftError::Store(format!(
                "settings root must be an object, got {}",
                type_name(&other)
            ))),
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }

    pub fn get(&self, path: &KeyPath) -> Option<&Value> {
        path.lookup(&self.root)
    }

    /// Copy out everything under `namespace`.
    pub fn snapshot(&self, namespace: &str) -> Result<Snapshot> {
        if namespace.is_empty() {
            return Ok(self.root.clone());
        }

        let path = KeyPath::parse(namespace)?;
        match self.get(&path) {
            None | Some(Value::Null) => Ok(Snapshot::new()),
            Some(Value::Object(map)) => Ok(map.clone()),
            Some(other) => Err(KeyshiftError::Store(format!(
                "namespace '{}' holds a {}, not a settings section",
                namespace,
                type_name(other)
            ))),
        }
    }

    /// Write `value` at `path`. Non-object values on the way are replaced by sections.
    pub fn set(&mut self, path: &KeyPath, value: Value) {
        set_in(&mut self.root, path.segments(), value);
    }

    /// Remove the value at `path`, pruning sections left empty. Returns whether anything was removed.
    pub fn unset(&mut self, path: &KeyPath) -> bool {
        unset_in(&mut self.root, path.segments())
    }
}

fn set_in(map: &mut Map<String, Value>, segments: &[String], value: Value) {
    match segments {
        [] => {}
        [last] => {
            map.insert(last.clone(), value);
        }
        [head, rest @ ..] => {
            let child = map
                .entry(head.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if !child.is_object() {
                *child = Value::Object(Map::new());
            }
            if let Value::Object(child) = child {
                set_in(child, rest, value);
            }
        }
    }
}

fn unset_in(map: &mut Map<String, Value>, segments: &[String]) -> bool {
    match segments {
        [] => false,
        [last] => map.remove(last).is_some(),
        [head, rest @ ..] => {
            let Some(Value::Object(child)) = map.get_mut(head) else {
                return false;
            };
            let removed = unset_in(child, rest);
            if removed && child.is_empty() {
                map.remove(head);
            }
            removed
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(p: &str) -> KeyPath {
        KeyPath::parse(p).unwrap()
    }

    #[test]
    fn test_from_value_requires_object() {
        assert!(SettingsTree::from_value(json!({})).is_ok());
        assert!(SettingsTree::from_value(json!([1, 2])).is_err());
    }

    #[test]
    fn test_set_creates_sections() {
        let mut tree = SettingsTree::new();
        tree.set(&path("linter-eslint.autofix.fixOnSave"), json!(true));

        assert_eq!(
            tree.clone().into_value(),
            json!({ "linter-eslint": { "autofix": { "fixOnSave": true } } })
        );
        assert_eq!(
            tree.get(&path("linter-eslint.autofix.fixOnSave")),
            Some(&json!(true))
        );
    }

    #[test]
    fn test_set_replaces_scalar_parent() {
        let mut tree = SettingsTree::from_value(json!({ "ns": { "autofix": 1 } })).unwrap();
        tree.set(&path("ns.autofix.fixOnSave"), json!(false));
        assert_eq!(
            tree.into_value(),
            json!({ "ns": { "autofix": { "fixOnSave": false } } })
        );
    }

    #[test]
    fn test_unset_prunes_empty_sections() {
        let mut tree = SettingsTree::from_value(json!({
            "ns": { "autofix": { "fixOnSave": true }, "keep": 1 }
        }))
        .unwrap();

        assert!(tree.unset(&path("ns.autofix.fixOnSave")));
        assert_eq!(tree.clone().into_value(), json!({ "ns": { "keep": 1 } }));
        assert!(!tree.unset(&path("ns.autofix.fixOnSave")));
        assert!(!tree.unset(&path("ns.keep.deeper")));
    }

    #[test]
    fn test_snapshot() {
        let tree = SettingsTree::from_value(json!({
            "linter-eslint": { "fixOnSave": true },
            "other": 3
        }))
        .unwrap();

        let snapshot = tree.snapshot("linter-eslint").unwrap();
        assert_eq!(snapshot.get("fixOnSave"), Some(&json!(true)));
        assert!(tree.snapshot("missing").unwrap().is_empty());
        assert!(tree.snapshot("other").is_err());
        assert_eq!(tree.snapshot("").unwrap().len(), 2);
    }
}
