//! tm-db - Database abstraction layer for Tidemark
//!
//! This crate provides the `Database` and `Connector` traits, a small
//! driver-neutral `ResultSet` model, and implementations for PostgreSQL
//! (the usual remote target) and DuckDB (local database files).

pub mod connector;
pub mod duckdb;
pub mod error;
pub mod postgres;
pub mod traits;
pub mod value;

pub use crate::duckdb::{DuckDbBackend, DuckDbConnector, DuckDbOption};
pub use connector::connector_from_config;
pub use error::{DbError, DbResult};
pub use postgres::{PgConnector, PgOption, PostgresBackend};
pub use traits::{Connector, Database};
pub use value::{ResultSet, Row, SqlValue};
