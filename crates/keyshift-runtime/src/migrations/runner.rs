//! Settings migration runner.
//!
//! Applies an ordered list of migrations to one namespace of a host-owned
//! settings store. Every run starts from scratch: nothing records which
//! migrations already ran, so the migrations themselves must be safe to
//! repeat. Move sets are, because a moved key no longer exists at its old
//! location on the next run.

use keyshift_core::error::{KeyshiftError, Result};
use keyshift_core::key;
use keyshift_core::store::{ConfigStore, MemoryStore, Snapshot, StoreOp};
use serde::Serialize;
use tracing::{debug, info};

use super::builtin::{default_migrations, DEFAULT_NAMESPACE};
use super::descriptor::{CustomMigration, MigrationContext, MigrationDescriptor, MoveRule, MoveSet};

/// What one migration did during a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MigrationOutcome {
    Moved {
        description: String,
        moved: Vec<MoveRule>,
        skipped: usize,
    },
    Custom {
        description: String,
        changed: bool,
    },
}

/// Summary of a migration run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MigrationReport {
    pub outcomes: Vec<MigrationOutcome>,
}

impl MigrationReport {
    /// Number of keys moved across all move sets.
    pub fn moves_applied(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o {
                MigrationOutcome::Moved { moved, .. } => moved.len(),
                MigrationOutcome::Custom { .. } => 0,
            })
            .sum()
    }

    /// Outcomes that left the store different, in run order.
    pub fn changes(&self) -> impl Iterator<Item = &MigrationOutcome> {
        self.outcomes.iter().filter(|o| o.changed())
    }
}

impl MigrationOutcome {
    /// Whether this migration wrote anything.
    pub fn changed(&self) -> bool {
        match self {
            MigrationOutcome::Moved { moved, .. } => !moved.is_empty(),
            MigrationOutcome::Custom { changed, .. } => *changed,
        }
    }
}

/// Applies migrations to one settings namespace.
pub struct ConfigMigrator<'m> {
    namespace: String,
    migrations: &'m [MigrationDescriptor],
}

impl<'m> ConfigMigrator<'m> {
    pub fn new(namespace: impl Into<String>, migrations: &'m [MigrationDescriptor]) -> Self {
        Self {
            namespace: namespace.into(),
            migrations,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn migrations(&self) -> &'m [MigrationDescriptor] {
        self.migrations
    }

    /// Apply every migration in declared order.
    ///
    /// The namespace is read once up front; move rules and custom migrations
    /// all look at that snapshot. The first error aborts the run, leaving any
    /// writes made so far in place.
    pub fn apply(&self, store: &mut dyn ConfigStore) -> Result<MigrationReport> {
        let mut report = MigrationReport::default();

        if self.migrations.is_empty() {
            debug!("No migrations registered for {}", self.namespace);
            return Ok(report);
        }

        let snapshot = store.get(&self.namespace)?;
        debug!(
            namespace = %self.namespace,
            keys = snapshot.len(),
            "Loaded settings snapshot"
        );

        for migration in self.migrations {
            let outcome = match migration {
                MigrationDescriptor::MoveSet(set) => self.apply_moves(set, &snapshot, store)?,
                MigrationDescriptor::Custom(custom) => {
                    self.apply_custom(custom, &snapshot, store)?
                }
            };
            report.outcomes.push(outcome);
        }

        info!(
            namespace = %self.namespace,
            migrations = self.migrations.len(),
            moved = report.moves_applied(),
            "Settings migrations complete"
        );
        Ok(report)
    }

    /// Compute the writes `apply` would make, without touching `store`.
    pub fn plan(&self, store: &dyn ConfigStore) -> Result<Vec<StoreOp>> {
        if self.migrations.is_empty() {
            return Ok(Vec::new());
        }

        let snapshot = store.get(&self.namespace)?;
        let mut shadow = MemoryStore::with_namespace(&self.namespace, snapshot)?;
        self.apply(&mut shadow)?;
        Ok(shadow.writes())
    }

    fn apply_moves(
        &self,
        set: &MoveSet,
        snapshot: &Snapshot,
        store: &mut dyn ConfigStore,
    ) -> Result<MigrationOutcome> {
        let mut moved = Vec::new();
        let mut skipped = 0;

        for rule in &set.moves {
            let Some(value) = key::lookup_stored(snapshot, &rule.old) else {
                debug!("Skipping {}: not set", rule.old);
                skipped += 1;
                continue;
            };

            store.set(&key::join(&self.namespace, &rule.new), value.clone())?;
            store.unset(&key::join(&self.namespace, &rule.old))?;
            info!("Moved setting {} -> {}", rule.old, rule.new);
            moved.push(rule.clone());
        }

        Ok(MigrationOutcome::Moved {
            description: set.description.clone(),
            moved,
            skipped,
        })
    }

    fn apply_custom(
        &self,
        custom: &CustomMigration,
        snapshot: &Snapshot,
        store: &mut dyn ConfigStore,
    ) -> Result<MigrationOutcome> {
        info!("Running migration: {}", custom.description);

        let mut ctx = MigrationContext::new(&self.namespace, snapshot, store);
        custom
            .run(&mut ctx)
            .map_err(|e| KeyshiftError::migration(custom.description.clone(), e))?;

        if !ctx.changed() {
            debug!("Migration made no changes: {}", custom.description);
        }

        Ok(MigrationOutcome::Custom {
            description: custom.description.clone(),
            changed: ctx.changed(),
        })
    }
}

impl ConfigMigrator<'static> {
    /// Migrator for the built-in migrations under the default namespace.
    pub fn with_default_migrations() -> Self {
        Self::new(DEFAULT_NAMESPACE, default_migrations())
    }
}
