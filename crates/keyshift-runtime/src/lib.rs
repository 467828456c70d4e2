//! Settings migration runtime: migration descriptors, the migrator, the
//! built-in migration table and a file-backed settings store.

pub mod migrations;
pub mod observability;
pub mod store;

pub use migrations::{ConfigMigrator, MigrationDescriptor, MigrationReport};
pub use store::JsonFileStore;
