//! DuckDB database backend implementation

use crate::error::{DbError, DbResult};
use crate::traits::{Connector, Database};
use crate::value::{ResultSet, SqlValue};
use async_trait::async_trait;
use duckdb::types::Value;
use duckdb::{Config, Connection};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Tuning hook applied to the driver [`Config`] before opening
pub type DuckDbOption = Box<dyn Fn(Config) -> duckdb::Result<Config> + Send + Sync>;

/// DuckDB database backend
pub struct DuckDbBackend {
    conn: Mutex<Connection>,
}

impl DuckDbBackend {
    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        Self::open_with(path.to_string_lossy().as_ref(), &[])
    }

    /// Open `path` (or `:memory:`) after applying each option in order
    pub fn open_with(path: &str, options: &[DuckDbOption]) -> DbResult<Self> {
        let mut config = Config::default();
        for option in options {
            config = option(config).map_err(|e| DbError::ConnectionError(e.to_string()))?;
        }
        let conn = if path == ":memory:" {
            Connection::open_in_memory_with_flags(config)
        } else {
            Connection::open_with_flags(path, config)
        }
        .map_err(|e| DbError::ConnectionError(format!("{}: {}", e, path)))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))
    }

    /// Execute multiple SQL statements
    pub fn execute_batch(&self, sql: &str) -> DbResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(sql)
            .map_err(|e| DbError::ExecutionError(e.to_string()))
    }

    /// Query synchronously, converting every column to a [`SqlValue`]
    fn query_sync(&self, sql: &str) -> DbResult<ResultSet> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(sql).map_err(DbError::from)?;

        // column_count() panics before execution, so rows are collected
        // first and column metadata read afterwards.
        let rows: Vec<Vec<SqlValue>> = stmt
            .query_map([], |row| {
                let col_count = row.as_ref().column_count();
                (0..col_count)
                    .map(|i| row.get::<_, Value>(i).map(to_sql_value))
                    .collect::<duckdb::Result<Vec<_>>>()
            })
            .map_err(DbError::from)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DbError::ExecutionError(format!("row error: {}", e)))?;

        let columns: Vec<String> = (0..stmt.column_count())
            .map(|i| {
                stmt.column_name(i)
                    .map_or("?".to_string(), |v| v.to_string())
            })
            .collect();

        Ok(ResultSet::new(columns, rows))
    }
}

/// Convert an owned DuckDB value into the driver-neutral representation
fn to_sql_value(value: Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Boolean(b) => SqlValue::Bool(b),
        Value::TinyInt(n) => SqlValue::Int(n.into()),
        Value::SmallInt(n) => SqlValue::Int(n.into()),
        Value::Int(n) => SqlValue::Int(n.into()),
        Value::BigInt(n) => SqlValue::Int(n),
        Value::UTinyInt(n) => SqlValue::Int(n.into()),
        Value::USmallInt(n) => SqlValue::Int(n.into()),
        Value::UInt(n) => SqlValue::Int(n.into()),
        Value::Float(x) => SqlValue::Float(x.into()),
        Value::Double(x) => SqlValue::Float(x),
        Value::Text(s) | Value::Enum(s) => SqlValue::Text(s),
        Value::List(items) | Value::Array(items) => to_text_array(items),
        other => SqlValue::Unsupported(variant_name(&other)),
    }
}

fn to_text_array(items: Vec<Value>) -> SqlValue {
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Text(s) => out.push(Some(s)),
            Value::Null => out.push(None),
            other => return SqlValue::Unsupported(format!("{}[]", variant_name(&other))),
        }
    }
    SqlValue::TextArray(out)
}

/// `Timestamp(Microsecond, 0)` -> `Timestamp`
fn variant_name(value: &Value) -> String {
    let debug = format!("{:?}", value);
    debug
        .split(|c: char| c == '(' || c == ' ' || c == '{')
        .next()
        .unwrap_or("unknown")
        .to_string()
}

#[async_trait]
impl Database for DuckDbBackend {
    async fn query(&self, sql: &str) -> DbResult<ResultSet> {
        self.query_sync(sql)
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}

/// Opens [`DuckDbBackend`] sessions for one database file
pub struct DuckDbConnector {
    path: String,
    options: Vec<DuckDbOption>,
}

impl DuckDbConnector {
    /// Connector for `path` (or `:memory:`) with extra tuning options
    pub fn new(path: impl Into<String>, options: Vec<DuckDbOption>) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }
}

#[async_trait]
impl Connector for DuckDbConnector {
    async fn connect(&self) -> DbResult<Box<dyn Database>> {
        log::debug!("Opening DuckDB database {}", self.path);
        let backend = DuckDbBackend::open_with(&self.path, &self.options)?;
        Ok(Box::new(backend))
    }

    fn endpoint(&self) -> String {
        self.path.clone()
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
