//! History command implementation

use anyhow::{Context, Result};
use serde::Serialize;
use std::future::Future;
use tm_core::MigrationRecord;
use tm_sync::{HistoryReader, SyncError};

use crate::cli::{GlobalArgs, HistoryArgs, HistoryOutput};
use crate::commands::common::{plural, shutdown_signal, ExitCode, INTERRUPTED_EXIT_CODE};
use crate::context::RuntimeContext;

/// Execute the history command
pub(crate) async fn execute(args: &HistoryArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let entries = load_entries(&ctx, shutdown_signal()).await?;

    match args.output {
        HistoryOutput::Table => print_table(&entries),
        HistoryOutput::Json => print_json(&entries)?,
    }

    Ok(())
}

/// One remote migration as shown by `tm history`
#[derive(Debug, Serialize)]
struct HistoryEntry {
    version: String,
    name: String,
    statements: usize,
    /// Parsed from a `YYYYMMDDHHMMSS` version, when it is one
    created_at: Option<String>,
}

impl From<&MigrationRecord> for HistoryEntry {
    fn from(record: &MigrationRecord) -> Self {
        Self {
            version: record.version().to_string(),
            name: record.name().to_string(),
            statements: record.statements().len(),
            created_at: record
                .version()
                .timestamp()
                .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string()),
        }
    }
}

async fn load_entries<F>(ctx: &RuntimeContext, shutdown: F) -> Result<Vec<HistoryEntry>>
where
    F: Future<Output = ()>,
{
    let connector = ctx.connector()?;
    let endpoint = connector.endpoint();
    ctx.verbose(&format!("Reading history from {}", endpoint));

    match HistoryReader::new(connector.as_ref()).read(shutdown).await {
        Ok(records) => Ok(records.iter().map(HistoryEntry::from).collect()),
        Err(SyncError::Cancelled) => {
            eprintln!("History read interrupted.");
            Err(ExitCode(INTERRUPTED_EXIT_CODE).into())
        }
        Err(e) => {
            Err(e).with_context(|| format!("Failed to read migration history from {}", endpoint))
        }
    }
}

fn print_table(entries: &[HistoryEntry]) {
    let version_width = entries
        .iter()
        .map(|e| e.version.len())
        .max()
        .unwrap_or(7)
        .max(7);
    let name_width = entries
        .iter()
        .map(|e| e.name.len())
        .max()
        .unwrap_or(4)
        .max(4);
    let stmt_width = 10;

    println!(
        "{:<version_width$}  {:<name_width$}  {:>stmt_width$}  CREATED_AT",
        "VERSION", "NAME", "STATEMENTS",
    );
    println!(
        "{:-<version_width$}  {:-<name_width$}  {:-<stmt_width$}  {}",
        "",
        "",
        "",
        "-".repeat(19),
    );

    for entry in entries {
        println!(
            "{:<version_width$}  {:<name_width$}  {:>stmt_width$}  {}",
            entry.version,
            entry.name,
            entry.statements,
            entry.created_at.as_deref().unwrap_or("-"),
        );
    }

    println!();
    println!("{} in remote history", plural(entries.len(), "migration"));
}

fn print_json(entries: &[HistoryEntry]) -> Result<()> {
    let json = serde_json::to_string_pretty(entries).context("Failed to serialize history")?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
#[path = "history_test.rs"]
mod tests;
