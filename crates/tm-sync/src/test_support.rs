//! Shared fixtures for pipeline tests

use async_trait::async_trait;
use std::path::Path;
use tm_db::{Connector, Database, DbError, DbResult, DuckDbBackend, DuckDbConnector, ResultSet};

/// One bookkeeping row: version, name, statements
pub type HistoryRow<'a> = (&'a str, &'a str, &'a [&'a str]);

/// Create a DuckDB file at `path` holding the bookkeeping table with `rows`
pub fn seed_history(path: &Path, rows: &[HistoryRow<'_>]) {
    let db = DuckDbBackend::from_path(path).unwrap();
    db.execute_batch(
        "CREATE SCHEMA supabase_migrations;
         CREATE TABLE supabase_migrations.schema_migrations (
             version VARCHAR PRIMARY KEY,
             name VARCHAR,
             statements VARCHAR[]
         );",
    )
    .unwrap();
    for (version, name, statements) in rows {
        db.execute_batch(&format!(
            "INSERT INTO supabase_migrations.schema_migrations VALUES ({}, {}, {});",
            quote(version),
            quote(name),
            list(statements)
        ))
        .unwrap();
    }
}

/// Connector for a DuckDB file seeded with [`seed_history`]
pub fn history_connector(path: &Path, rows: &[HistoryRow<'_>]) -> DuckDbConnector {
    seed_history(path, rows);
    DuckDbConnector::new(path.to_string_lossy(), vec![])
}

fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

fn list(items: &[&str]) -> String {
    let quoted: Vec<String> = items.iter().map(|s| quote(s)).collect();
    format!("[{}]::VARCHAR[]", quoted.join(", "))
}

/// Connector whose connect call always fails
pub struct RefusingConnector;

#[async_trait]
impl Connector for RefusingConnector {
    async fn connect(&self) -> DbResult<Box<dyn Database>> {
        Err(DbError::ConnectionError("connection refused".to_string()))
    }

    fn endpoint(&self) -> String {
        "refusing".to_string()
    }
}

/// Connector whose connect call never completes
pub struct HangingConnector;

#[async_trait]
impl Connector for HangingConnector {
    async fn connect(&self) -> DbResult<Box<dyn Database>> {
        std::future::pending().await
    }

    fn endpoint(&self) -> String {
        "hanging".to_string()
    }
}

/// Connector handing out a session that answers every query with `result`
pub struct CannedConnector {
    pub result: fn() -> DbResult<ResultSet>,
    pub hang_on_query: bool,
}

struct CannedDatabase {
    result: fn() -> DbResult<ResultSet>,
    hang_on_query: bool,
}

#[async_trait]
impl Connector for CannedConnector {
    async fn connect(&self) -> DbResult<Box<dyn Database>> {
        Ok(Box::new(CannedDatabase {
            result: self.result,
            hang_on_query: self.hang_on_query,
        }))
    }

    fn endpoint(&self) -> String {
        "canned".to_string()
    }
}

#[async_trait]
impl Database for CannedDatabase {
    async fn query(&self, _sql: &str) -> DbResult<ResultSet> {
        if self.hang_on_query {
            std::future::pending::<()>().await;
        }
        (self.result)()
    }

    fn db_type(&self) -> &'static str {
        "canned"
    }
}
