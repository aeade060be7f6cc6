//! Read and decode the remote migration history

use crate::error::{SyncError, SyncResult};
use std::future::Future;
use tm_core::{MigrationRecord, MigrationVersion};
use tm_db::{Connector, ResultSet, Row, SqlValue};

/// The one query issued against the bookkeeping table.
///
/// Reads the whole table with no filter or ordering; row order is whatever
/// the server returns.
pub const HISTORY_QUERY: &str =
    "SELECT version, name, statements FROM supabase_migrations.schema_migrations";

/// Reads migration history through a [`Connector`]
pub struct HistoryReader<'a> {
    connector: &'a dyn Connector,
}

impl<'a> HistoryReader<'a> {
    /// Reader that connects through `connector`
    pub fn new(connector: &'a dyn Connector) -> Self {
        Self { connector }
    }

    /// Connect, run [`HISTORY_QUERY`], and decode every row.
    ///
    /// If `shutdown` completes before the connection or the query finishes,
    /// the read stops with [`SyncError::Cancelled`]. A row that fails to
    /// decode fails the whole read.
    pub async fn read<F>(&self, shutdown: F) -> SyncResult<Vec<MigrationRecord>>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        let endpoint = self.connector.endpoint();
        let db = tokio::select! {
            biased;
            _ = &mut shutdown => return Err(SyncError::Cancelled),
            result = self.connector.connect() => {
                result.map_err(|source| SyncError::Connection { endpoint, source })?
            }
        };

        log::debug!("Querying migration history ({})", db.db_type());
        let rows = tokio::select! {
            biased;
            _ = &mut shutdown => return Err(SyncError::Cancelled),
            result = db.query(HISTORY_QUERY) => result.map_err(SyncError::Query)?,
        };
        log::debug!("Fetched {} history rows", rows.len());

        decode_rows(&rows)
    }
}

/// Decode every row in server order; the first bad row fails the batch.
pub fn decode_rows(rows: &ResultSet) -> SyncResult<Vec<MigrationRecord>> {
    rows.rows().map(|row| decode_row(&row)).collect()
}

fn decode_row(row: &Row<'_>) -> SyncResult<MigrationRecord> {
    let version = MigrationVersion::new(text_column(row, "version")?);
    let name = text_column(row, "name")?;
    let statements = statements_column(row, "statements")?;
    Ok(MigrationRecord::new(version, name, statements))
}

fn decode_error(row: &Row<'_>, column: &str, message: impl Into<String>) -> SyncError {
    SyncError::Decode {
        row: row.index(),
        column: column.to_string(),
        message: message.into(),
    }
}

fn column<'r>(row: &Row<'r>, column: &str) -> SyncResult<&'r SqlValue> {
    row.get(column)
        .ok_or_else(|| decode_error(row, column, "column missing from result set"))
}

fn text_column(row: &Row<'_>, name: &str) -> SyncResult<String> {
    match column(row, name)? {
        SqlValue::Text(s) => Ok(s.clone()),
        SqlValue::Null => Err(decode_error(row, name, "unexpected NULL")),
        other => Err(decode_error(
            row,
            name,
            format!("expected text, found {}", other.kind()),
        )),
    }
}

fn statements_column(row: &Row<'_>, name: &str) -> SyncResult<Vec<String>> {
    match column(row, name)? {
        SqlValue::TextArray(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.clone().ok_or_else(|| {
                    decode_error(row, name, format!("element {} is NULL", i))
                })
            })
            .collect(),
        SqlValue::Null => Err(decode_error(row, name, "unexpected NULL")),
        other => Err(decode_error(
            row,
            name,
            format!("expected text[], found {}", other.kind()),
        )),
    }
}

#[cfg(test)]
#[path = "history_test.rs"]
mod tests;
