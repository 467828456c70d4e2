//! keyshift - one-time migrations for persisted plugin settings.
//!
//! Renames flat setting keys to namespaced sections and retires deprecated
//! keys, against any host settings store implementing [`ConfigStore`].

#[doc(hidden)]
pub use keyshift_core;

pub use keyshift_core::config::KeyshiftConfig;
pub use keyshift_core::error::{KeyshiftError, Result};
pub use keyshift_core::store::{ConfigStore, MemoryStore, Snapshot, StoreOp};
pub use keyshift_runtime::migrations::{
    default_migrations, ConfigMigrator, CustomMigration, MigrationContext, MigrationDescriptor,
    MigrationOutcome, MigrationReport, MoveRule, MoveSet, DEFAULT_NAMESPACE,
};
pub use keyshift_runtime::store::JsonFileStore;

#[cfg(feature = "testing")]
pub use keyshift_core::{assert_no_writes, assert_setting, assert_unset};
