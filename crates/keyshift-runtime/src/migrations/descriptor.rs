use std::fmt;

use keyshift_core::error::Result;
use keyshift_core::key;
use keyshift_core::store::{ConfigStore, Snapshot};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single rename from an old setting key to a new one, relative to the namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRule {
    pub old: String,
    pub new: String,
}

impl MoveRule {
    pub fn new(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            old: old.into(),
            new: new.into(),
        }
    }
}

/// A batch of renames. Existing values at the new keys are overwritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveSet {
    /// When the migration was introduced (free-form, e.g. "January, 2018").
    pub added: String,
    pub description: String,
    pub moves: Vec<MoveRule>,
}

/// Signature of a custom migration body.
pub type MigrateFn = dyn Fn(&mut MigrationContext<'_>) -> Result<()> + Send + Sync;

/// A migration implemented as code.
pub struct CustomMigration {
    pub added: String,
    pub description: String,
    migrate: Box<MigrateFn>,
}

impl CustomMigration {
    pub fn new<F>(added: impl Into<String>, description: impl Into<String>, migrate: F) -> Self
    where
        F: Fn(&mut MigrationContext<'_>) -> Result<()> + Send + Sync + 'static,
    {
        Self {
            added: added.into(),
            description: description.into(),
            migrate: Box::new(migrate),
        }
    }

    pub(crate) fn run(&self, ctx: &mut MigrationContext<'_>) -> Result<()> {
        (self.migrate)(ctx)
    }
}

impl fmt::Debug for CustomMigration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomMigration")
            .field("added", &self.added)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// One step in upgrading persisted settings.
#[derive(Debug)]
pub enum MigrationDescriptor {
    MoveSet(MoveSet),
    Custom(CustomMigration),
}

impl MigrationDescriptor {
    pub fn moves(
        added: impl Into<String>,
        description: impl Into<String>,
        moves: impl IntoIterator<Item = (&'static str, &'static str)>,
    ) -> Self {
        MigrationDescriptor::MoveSet(MoveSet {
            added: added.into(),
            description: description.into(),
            moves: moves
                .into_iter()
                .map(|(old, new)| MoveRule::new(old, new))
                .collect(),
        })
    }

    pub fn custom<F>(added: impl Into<String>, description: impl Into<String>, migrate: F) -> Self
    where
        F: Fn(&mut MigrationContext<'_>) -> Result<()> + Send + Sync + 'static,
    {
        MigrationDescriptor::Custom(CustomMigration::new(added, description, migrate))
    }

    pub fn added(&self) -> &str {
        match self {
            MigrationDescriptor::MoveSet(set) => &set.added,
            MigrationDescriptor::Custom(custom) => &custom.added,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            MigrationDescriptor::MoveSet(set) => &set.description,
            MigrationDescriptor::Custom(custom) => &custom.description,
        }
    }
}

/// What a custom migration sees while it runs.
///
/// Reads come from the snapshot taken before the first migration of the run,
/// not from the live store. Writes go straight to the live store, with keys
/// resolved against the namespace.
pub struct MigrationContext<'a> {
    namespace: &'a str,
    snapshot: &'a Snapshot,
    store: &'a mut dyn ConfigStore,
    changed: bool,
}

impl<'a> MigrationContext<'a> {
    pub fn new(namespace: &'a str, snapshot: &'a Snapshot, store: &'a mut dyn ConfigStore) -> Self {
        Self {
            namespace,
            snapshot,
            store,
            changed: false,
        }
    }

    pub fn namespace(&self) -> &str {
        self.namespace
    }

    /// The settings as they were when the run started.
    pub fn snapshot(&self) -> &Snapshot {
        self.snapshot
    }

    /// A namespace-relative setting from the pre-run snapshot. `null` counts as absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        key::lookup(self.snapshot, key)
    }

    /// Write a namespace-relative setting to the live store.
    pub fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.changed = true;
        self.store.set(&key::join(self.namespace, key), value)
    }

    /// Remove a namespace-relative setting from the live store.
    pub fn unset(&mut self, key: &str) -> Result<()> {
        self.changed = true;
        self.store.unset(&key::join(self.namespace, key))
    }

    /// Direct access to the live store, with full paths.
    ///
    /// Counts as a change, since the caller may write through it.
    pub fn store(&mut self) -> &mut dyn ConfigStore {
        self.changed = true;
        &mut *self.store
    }

    /// Whether the migration has written, or may have written, to the store.
    pub fn changed(&self) -> bool {
        self.changed
    }
}
