//! PostgreSQL database backend implementation

use crate::error::{DbError, DbResult};
use crate::traits::{Connector, Database};
use crate::value::{ResultSet, SqlValue};
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgConnection, PgRow};
use sqlx::{Column, ConnectOptions, Row, TypeInfo};
use std::str::FromStr;
use std::time::Duration;
use tokio::sync::Mutex;

/// Tuning hook applied to [`PgConnectOptions`] before connecting
pub type PgOption = Box<dyn Fn(PgConnectOptions) -> PgConnectOptions + Send + Sync>;

/// Default bound on connection setup
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// PostgreSQL backend holding a single dedicated connection
pub struct PostgresBackend {
    conn: Mutex<PgConnection>,
}

impl PostgresBackend {
    /// Connect with fully-resolved options
    pub async fn connect_with(options: &PgConnectOptions) -> DbResult<Self> {
        let conn = options
            .connect()
            .await
            .map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

#[async_trait]
impl Database for PostgresBackend {
    async fn query(&self, sql: &str) -> DbResult<ResultSet> {
        let mut conn = self.conn.lock().await;
        let rows: Vec<PgRow> = sqlx::query(sql).fetch_all(&mut *conn).await?;

        let columns: Vec<String> = rows
            .first()
            .map(|row| row.columns().iter().map(|c| c.name().to_string()).collect())
            .unwrap_or_default();

        let values: Vec<Vec<SqlValue>> = rows.iter().map(decode_row).collect();

        Ok(ResultSet::new(columns, values))
    }

    fn db_type(&self) -> &'static str {
        "postgres"
    }
}

fn decode_row(row: &PgRow) -> Vec<SqlValue> {
    (0..row.len()).map(|idx| decode_column(row, idx)).collect()
}

/// Convert one column by its server-reported type name.
///
/// Types outside the handled set, and values the driver fails to decode,
/// come back as [`SqlValue::Unsupported`] so only callers that actually read
/// the column have to deal with them, and can name the column when they do.
fn decode_column(row: &PgRow, idx: usize) -> SqlValue {
    let type_name = row.column(idx).type_info().name().to_string();
    let decoded = match type_name.as_str() {
        "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => row
            .try_get::<Option<String>, _>(idx)
            .map(|v| v.map(SqlValue::Text)),
        "TEXT[]" | "VARCHAR[]" | "BPCHAR[]" | "NAME[]" => row
            .try_get::<Option<Vec<Option<String>>>, _>(idx)
            .map(|v| v.map(SqlValue::TextArray)),
        "INT2" => row
            .try_get::<Option<i16>, _>(idx)
            .map(|v| v.map(|n| SqlValue::Int(n.into()))),
        "INT4" => row
            .try_get::<Option<i32>, _>(idx)
            .map(|v| v.map(|n| SqlValue::Int(n.into()))),
        "INT8" => row
            .try_get::<Option<i64>, _>(idx)
            .map(|v| v.map(SqlValue::Int)),
        "BOOL" => row
            .try_get::<Option<bool>, _>(idx)
            .map(|v| v.map(SqlValue::Bool)),
        "FLOAT4" => row
            .try_get::<Option<f32>, _>(idx)
            .map(|v| v.map(|x| SqlValue::Float(x.into()))),
        "FLOAT8" => row
            .try_get::<Option<f64>, _>(idx)
            .map(|v| v.map(SqlValue::Float)),
        _ => return SqlValue::Unsupported(type_name.clone()),
    };
    match decoded {
        Ok(value) => value.unwrap_or(SqlValue::Null),
        Err(e) => undecodable(&type_name, &e),
    }
}

/// Placeholder for a value of a known type that the driver could not decode
fn undecodable(type_name: &str, err: &sqlx::Error) -> SqlValue {
    log::debug!("Could not decode {} value: {}", type_name, err);
    SqlValue::Unsupported(format!("undecodable {} ({})", type_name, err))
}

/// Opens [`PostgresBackend`] sessions for one server
pub struct PgConnector {
    options: PgConnectOptions,
    tuning: Vec<PgOption>,
    timeout: Duration,
}

impl PgConnector {
    /// Connector from already-built options plus tuning hooks
    pub fn new(options: PgConnectOptions, tuning: Vec<PgOption>) -> Self {
        Self {
            options,
            tuning,
            timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Connector from a `postgres://` URL
    pub fn from_url(url: &str, tuning: Vec<PgOption>) -> DbResult<Self> {
        let options = PgConnectOptions::from_str(url)
            .map_err(|e| DbError::ConnectionError(format!("invalid connection url: {}", e)))?;
        Ok(Self::new(options, tuning))
    }

    /// Bound connection setup; expiry is reported as a connection error
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Options with every tuning hook applied, in order
    pub fn resolved_options(&self) -> PgConnectOptions {
        self.tuning
            .iter()
            .fold(self.options.clone(), |options, tune| tune(options))
    }
}

#[async_trait]
impl Connector for PgConnector {
    async fn connect(&self) -> DbResult<Box<dyn Database>> {
        let options = self.resolved_options();
        log::debug!("Connecting to PostgreSQL at {}", self.endpoint());
        match tokio::time::timeout(self.timeout, PostgresBackend::connect_with(&options)).await {
            Ok(backend) => Ok(Box::new(backend?)),
            Err(_) => Err(DbError::ConnectionError(format!(
                "timed out after {}s connecting to {}",
                self.timeout.as_secs_f32(),
                self.endpoint()
            ))),
        }
    }

    fn endpoint(&self) -> String {
        let options = self.resolved_options();
        format!(
            "{}@{}:{}/{}",
            options.get_username(),
            options.get_host(),
            options.get_port(),
            options.get_database().unwrap_or("postgres")
        )
    }
}

#[cfg(test)]
#[path = "postgres_test.rs"]
mod tests;
