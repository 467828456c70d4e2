//! Testing utilities for settings migrations.
//!
//! Migrations are tested against a [`MemoryStore`], which records every
//! operation so a test can check both the resulting settings and the exact
//! sequence of writes.
//!
//! # Example
//!
//! ```ignore
//! use keyshift_core::testing::*;
//!
//! let mut store = store_with("linter-eslint", json!({ "fixOnSave": true }));
//! migrator.apply(&mut store)?;
//!
//! assert_setting!(store, "linter-eslint.autofix.fixOnSave", json!(true));
//! assert_unset!(store, "linter-eslint.fixOnSave");
//! ```

pub mod assertions;

use serde_json::Value;

use crate::store::MemoryStore;

/// Build a store whose `namespace` section holds `settings`.
///
/// Panics if `settings` is not a JSON object.
pub fn store_with(namespace: &str, settings: Value) -> MemoryStore {
    let snapshot = match settings {
        Value::Object(map) => map,
        other => panic!("store_with expects a JSON object, got {}", other),
    };
    match MemoryStore::with_namespace(namespace, snapshot) {
        Ok(store) => store,
        Err(e) => panic!("invalid namespace '{}': {}", namespace, e),
    }
}
