//! In-memory settings store.
//!
//! Records every operation it serves so callers can inspect exactly what a
//! migration did. Dry runs replay migrations against one of these. With the
//! `testing` feature, tests can also inject store failures.

use std::sync::{PoisonError, RwLock};

use serde_json::Value;

use super::{ConfigStore, SettingsTree, Snapshot, StoreOp};
use crate::error::Result;
#[cfg(any(test, feature = "testing"))]
use crate::error::KeyshiftError;
use crate::key::{self, KeyPath};

/// Kind of store operation, used to target injected failures.
#[cfg(any(test, feature = "testing"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Get,
    Set,
    Unset,
}

/// In-memory [`ConfigStore`] with an operation journal.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tree: SettingsTree,
    ops: RwLock<Vec<StoreOp>>,
    #[cfg(any(test, feature = "testing"))]
    fail_on: Option<(OpKind, String)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `value` as its whole settings tree.
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(Self {
            tree: SettingsTree::from_value(value)?,
            ..Self::default()
        })
    }

    /// Create a store whose `namespace` section holds `snapshot`.
    pub fn with_namespace(namespace: &str, snapshot: Snapshot) -> Result<Self> {
        let mut store = Self::new();
        if namespace.is_empty() {
            store.tree = SettingsTree::from_value(Value::Object(snapshot))?;
        } else {
            store
                .tree
                .set(&KeyPath::parse(namespace)?, Value::Object(snapshot));
        }
        Ok(store)
    }

    /// Inject a failure for operations on `target` (a path, or a namespace for gets).
    ///
    /// Set and unset failures fire once; get failures persist.
    #[cfg(any(test, feature = "testing"))]
    pub fn fail_on(mut self, kind: OpKind, target: impl Into<String>) -> Self {
        self.fail_on = Some((kind, target.into()));
        self
    }

    /// Current value at a full dotted path.
    pub fn value(&self, path: &str) -> Option<Value> {
        let path = KeyPath::parse(path).ok()?;
        self.tree.get(&path).cloned()
    }

    pub fn tree(&self) -> &SettingsTree {
        &self.tree
    }

    pub fn into_value(self) -> Value {
        self.tree.into_value()
    }

    /// Every operation served so far, in order.
    pub fn ops(&self) -> Vec<StoreOp> {
        self.ops
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Only the `set`/`unset` operations served so far.
    pub fn writes(&self) -> Vec<StoreOp> {
        self.ops().into_iter().filter(StoreOp::is_write).collect()
    }

    pub fn clear_ops(&self) {
        self.ops
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn record(&self, op: StoreOp) {
        self.ops
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(op);
    }

    #[cfg(any(test, feature = "testing"))]
    fn check_fault(&mut self, kind: OpKind, target: &str) -> Result<()> {
        let hit = matches!(&self.fail_on, Some((k, t)) if *k == kind && t == target);
        if !hit {
            return Ok(());
        }

        self.fail_on = None;
        Err(KeyshiftError::Store(format!(
            "injected {:?} failure on '{}'",
            kind, target
        )))
    }

    #[cfg(any(test, feature = "testing"))]
    fn check_get_fault(&self, namespace: &str) -> Result<()> {
        match &self.fail_on {
            Some((OpKind::Get, target)) if target == namespace => Err(KeyshiftError::Store(
                format!("injected Get failure on '{}'", namespace),
            )),
            _ => Ok(()),
        }
    }
}

impl ConfigStore for MemoryStore {
    fn get(&self, namespace: &str) -> Result<Snapshot> {
        #[cfg(any(test, feature = "testing"))]
        self.check_get_fault(namespace)?;

        let snapshot = self.tree.snapshot(namespace)?;
        self.record(StoreOp::Get {
            namespace: namespace.to_string(),
        });
        Ok(snapshot)
    }

    fn set(&mut self, path: &str, value: Value) -> Result<()> {
        let parsed = KeyPath::parse(path)?;
        #[cfg(any(test, feature = "testing"))]
        self.check_fault(OpKind::Set, path)?;
        self.tree.set(&parsed, value.clone());
        self.record(StoreOp::Set {
            path: path.to_string(),
            value,
        });
        Ok(())
    }

    fn unset(&mut self, path: &str) -> Result<()> {
        let parsed = KeyPath::parse(path)?;
        #[cfg(any(test, feature = "testing"))]
        self.check_fault(OpKind::Unset, path)?;
        self.tree.unset(&parsed);
        self.record(StoreOp::Unset {
            path: path.to_string(),
        });
        Ok(())
    }
}

/// Read one namespace-relative setting out of a store, ignoring nulls.
pub fn read_setting(store: &dyn ConfigStore, namespace: &str, key: &str) -> Result<Option<Value>> {
    let snapshot = store.get(namespace)?;
    Ok(key::lookup(&snapshot, key).cloned())
}
