//! tm-core - Core library for Tidemark
//!
//! This crate provides the migration history record, the rules that turn a
//! record into an on-disk SQL artifact, and `tidemark.yml` configuration
//! parsing shared by the other Tidemark crates.

pub mod config;
pub mod error;
pub mod migration;
pub mod version;

pub use config::{Config, DatabaseConfig, DbType, TargetConfig};
pub use error::{CoreError, CoreResult};
pub use migration::{MigrationRecord, HISTORY_TABLE, STATEMENT_TERMINATOR};
pub use version::MigrationVersion;
