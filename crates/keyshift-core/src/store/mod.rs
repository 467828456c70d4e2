//! Settings store abstraction.
//!
//! The host application owns persisted settings; keyshift only talks to them
//! through [`ConfigStore`]. Paths are full dotted paths (`namespace.key`).

mod memory;
mod tree;

pub use memory::{read_setting, MemoryStore};
#[cfg(any(test, feature = "testing"))]
pub use memory::OpKind;
pub use tree::SettingsTree;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// Settings under one namespace, keyed by namespace-relative key.
pub type Snapshot = Map<String, Value>;

/// A host-owned key-value settings store.
pub trait ConfigStore {
    /// Read every setting under `namespace`. A missing namespace is empty.
    fn get(&self, namespace: &str) -> Result<Snapshot>;

    /// Write `value` at the full dotted `path`, creating parent sections.
    fn set(&mut self, path: &str, value: Value) -> Result<()>;

    /// Remove the setting at the full dotted `path`. Removing an absent key is not an error.
    fn unset(&mut self, path: &str) -> Result<()>;
}

impl<T: ConfigStore + ?Sized> ConfigStore for &mut T {
    fn get(&self, namespace: &str) -> Result<Snapshot> {
        (**self).get(namespace)
    }

    fn set(&mut self, path: &str, value: Value) -> Result<()> {
        (**self).set(path, value)
    }

    fn unset(&mut self, path: &str) -> Result<()> {
        (**self).unset(path)
    }
}

/// A recorded store operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum StoreOp {
    Get { namespace: String },
    Set { path: String, value: Value },
    Unset { path: String },
}

impl StoreOp {
    /// Whether this operation mutates the store.
    pub fn is_write(&self) -> bool {
        !matches!(self, StoreOp::Get { .. })
    }

    /// The path or namespace the operation targets.
    pub fn target(&self) -> &str {
        match self {
            StoreOp::Get { namespace } => namespace,
            StoreOp::Set { path, .. } | StoreOp::Unset { path } => path,
        }
    }
}

impl std::fmt::Display for StoreOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreOp::Get { namespace } => write!(f, "get {}", namespace),
            StoreOp::Set { path, value } => write!(f, "set {} = {}", path, value),
            StoreOp::Unset { path } => write!(f, "unset {}", path),
        }
    }
}
