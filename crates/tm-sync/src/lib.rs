//! tm-sync - the Tidemark fetch pipeline
//!
//! Mirrors the remote migration bookkeeping table into a local directory of
//! `{version}_{name}.sql` files:
//!
//! 1. [`prepare_directory`] makes sure the migrations directory exists.
//! 2. [`ConflictGate`] asks before touching a non-empty directory.
//! 3. [`HistoryReader`] connects, runs the history query, and decodes rows.
//! 4. [`ArtifactWriter`] writes one file per record, in order.
//!
//! [`fetch`] runs all four steps.

pub mod directory;
pub mod error;
pub mod fetch;
pub mod history;
pub mod prompt;
pub mod storage;
pub mod writer;

pub use directory::{prepare_directory, ConflictGate, GateDecision};
pub use error::{SyncError, SyncResult};
pub use fetch::{fetch, FetchOutcome};
pub use history::{decode_rows, HistoryReader, HISTORY_QUERY};
pub use prompt::{AssumeYes, Confirm, PromptConfirm};
pub use storage::{FsStorage, Storage, ARTIFACT_MODE};
pub use writer::ArtifactWriter;

#[cfg(test)]
pub(crate) mod test_support;
