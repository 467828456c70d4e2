//! Settings persisted as a JSON document on disk.

use std::path::{Path, PathBuf};

use keyshift_core::error::{KeyshiftError, Result};
use keyshift_core::key::KeyPath;
use keyshift_core::store::{ConfigStore, SettingsTree, Snapshot};
use serde_json::Value;
use tracing::{debug, info};

/// A [`ConfigStore`] backed by a JSON settings file.
///
/// Changes are kept in memory until [`save`](Self::save) is called.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    tree: SettingsTree,
    dirty: bool,
}

impl JsonFileStore {
    /// Open a settings file. A missing file is treated as empty settings.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let tree = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                SettingsTree::new()
            } else {
                let value: Value = serde_json::from_str(&content)?;
                SettingsTree::from_value(value).map_err(|e| {
                    KeyshiftError::Store(format!("{}: {}", path.display(), e))
                })?
            }
        } else {
            debug!("Settings file {:?} does not exist, starting empty", path);
            SettingsTree::new()
        };

        Ok(Self {
            path,
            tree,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether there are changes not yet written to disk.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn tree(&self) -> &SettingsTree {
        &self.tree
    }

    /// Write pending changes to disk. Returns whether anything was written.
    ///
    /// The document is written to a sibling temporary file and renamed over
    /// the original, so readers never see a partial file.
    pub fn save(&mut self) -> Result<bool> {
        if !self.dirty {
            return Ok(false);
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut content = serde_json::to_string_pretty(self.tree.as_map())?;
        content.push('\n');

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)?;

        self.dirty = false;
        info!("Saved settings to {}", self.path.display());
        Ok(true)
    }
}

impl ConfigStore for JsonFileStore {
    fn get(&self, namespace: &str) -> Result<Snapshot> {
        self.tree.snapshot(namespace)
    }

    fn set(&mut self, path: &str, value: Value) -> Result<()> {
        let path = KeyPath::parse(path)?;
        self.tree.set(&path, value);
        self.dirty = true;
        Ok(())
    }

    fn unset(&mut self, path: &str) -> Result<()> {
        let path = KeyPath::parse(path)?;
        if self.tree.unset(&path) {
            self.dirty = true;
        }
        Ok(())
    }
}
