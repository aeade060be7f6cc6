//! Build a [`Connector`] from project configuration

use crate::duckdb::{DuckDbConnector, DuckDbOption};
use crate::error::{DbError, DbResult};
use crate::postgres::{PgConnector, PgOption};
use crate::traits::Connector;
use sqlx::postgres::PgConnectOptions;
use std::time::Duration;
use tm_core::{DatabaseConfig, DbType};

/// Name reported to the server in `pg_stat_activity`
pub const APPLICATION_NAME: &str = "tidemark";

/// Create the connector described by `config`.
///
/// PostgreSQL sessions identify themselves as [`APPLICATION_NAME`]; DuckDB
/// files are opened read-only since history is never written back.
pub fn connector_from_config(config: &DatabaseConfig) -> DbResult<Box<dyn Connector>> {
    match config.db_type {
        DbType::Postgres => {
            let tuning: Vec<PgOption> =
                vec![Box::new(|o: PgConnectOptions| o.application_name(APPLICATION_NAME))];
            let connector = match &config.url {
                Some(url) => PgConnector::from_url(url, tuning)?,
                None => PgConnector::new(pg_options_from_fields(config), tuning),
            };
            Ok(Box::new(connector.with_connect_timeout(Duration::from_secs(
                config.connect_timeout_secs,
            ))))
        }
        DbType::DuckDb => {
            let path = config.path.as_deref().filter(|p| !p.is_empty()).ok_or_else(|| {
                DbError::ConnectionError("duckdb database path is not configured".to_string())
            })?;
            let read_only: DuckDbOption =
                Box::new(|c: duckdb::Config| c.access_mode(duckdb::AccessMode::ReadOnly));
            Ok(Box::new(DuckDbConnector::new(path, vec![read_only])))
        }
    }
}

fn pg_options_from_fields(config: &DatabaseConfig) -> PgConnectOptions {
    let options = PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .database(&config.name);
    match &config.password {
        Some(password) => options.password(password),
        None => options,
    }
}

#[cfg(test)]
#[path = "connector_test.rs"]
mod tests;
