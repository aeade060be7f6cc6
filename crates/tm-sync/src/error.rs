//! Error types for tm-sync

use thiserror::Error;
use tm_db::DbError;

/// Fetch pipeline errors.
///
/// An operator declining the overwrite prompt is not an error; it is reported
/// as [`FetchOutcome::Declined`](crate::FetchOutcome::Declined).
#[derive(Error, Debug)]
pub enum SyncError {
    /// S001: Migrations directory could not be created or inspected
    #[error("[S001] Failed to prepare migrations directory '{path}': {source}")]
    Storage {
        path: String,
        source: std::io::Error,
    },

    /// S002: Shutdown signal fired while connecting or querying
    #[error("[S002] Operation cancelled")]
    Cancelled,

    /// S003: Could not establish a database connection
    #[error("[S003] Failed to connect to {endpoint}: {source}")]
    Connection {
        endpoint: String,
        source: DbError,
    },

    /// S004: History query failed
    #[error("[S004] Failed to query migration history: {0}")]
    Query(#[source] DbError),

    /// S005: A history row could not be turned into a record
    #[error("[S005] Failed to decode history row {row}, column '{column}': {message}")]
    Decode {
        row: usize,
        column: String,
        message: String,
    },

    /// S006: A migration file could not be written
    #[error("[S006] Failed to write migration '{path}': {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    /// S007: The overwrite question could not be asked or answered
    #[error("[S007] Failed to read confirmation: {0}")]
    Prompt(#[source] std::io::Error),
}

/// Result type alias for SyncError
pub type SyncResult<T> = Result<T, SyncError>;
