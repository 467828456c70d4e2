mod builtin;
mod descriptor;
mod runner;

pub use builtin::{default_migrations, DEFAULT_NAMESPACE};
pub use descriptor::{
    CustomMigration, MigrateFn, MigrationContext, MigrationDescriptor, MoveRule, MoveSet,
};
pub use runner::{ConfigMigrator, MigrationOutcome, MigrationReport};
