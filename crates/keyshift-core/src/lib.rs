pub mod config;
pub mod error;
pub mod key;
pub mod store;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use config::KeyshiftConfig;
pub use error::{KeyshiftError, Result};
pub use key::KeyPath;
pub use store::{ConfigStore, MemoryStore, SettingsTree, Snapshot, StoreOp};
