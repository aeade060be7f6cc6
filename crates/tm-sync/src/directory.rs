//! Migrations directory preparation and the overwrite gate

use crate::error::{SyncError, SyncResult};
use crate::prompt::Confirm;
use crate::storage::Storage;
use std::path::Path;

/// Make sure `dir` exists, creating parents as needed.
pub fn prepare_directory(storage: &dyn Storage, dir: &Path) -> SyncResult<()> {
    storage.ensure_dir(dir).map_err(|e| SyncError::Storage {
        path: dir.display().to_string(),
        source: e,
    })?;
    log::debug!("Migrations directory ready: {}", dir.display());
    Ok(())
}

/// What the gate decided about proceeding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Directory was empty; nothing to overwrite
    Empty,
    /// Directory had files and the operator agreed to overwrite them
    Approved,
    /// Directory had files and the operator declined
    Declined,
}

impl GateDecision {
    /// True unless the operator declined
    pub fn proceed(self) -> bool {
        !matches!(self, GateDecision::Declined)
    }
}

/// Guards destructive writes into a directory that already has content
pub struct ConflictGate<'a> {
    storage: &'a dyn Storage,
    confirm: &'a mut dyn Confirm,
}

impl<'a> ConflictGate<'a> {
    /// Gate backed by `storage` that asks `confirm` when needed
    pub fn new(storage: &'a dyn Storage, confirm: &'a mut dyn Confirm) -> Self {
        Self { storage, confirm }
    }

    /// Inspect `dir` and ask before proceeding if it is not empty.
    ///
    /// The question defaults to yes.
    pub fn check(&mut self, dir: &Path) -> SyncResult<GateDecision> {
        let storage_error = |e| SyncError::Storage {
            path: dir.display().to_string(),
            source: e,
        };

        if self.storage.is_empty(dir).map_err(storage_error)? {
            return Ok(GateDecision::Empty);
        }

        log::warn!("Migrations directory {} is not empty", dir.display());
        let question = format!(
            "Do you want to overwrite existing files in {} directory?",
            dir.display()
        );
        let approved = self
            .confirm
            .confirm(&question, true)
            .map_err(SyncError::Prompt)?;
        let decision = if approved {
            GateDecision::Approved
        } else {
            GateDecision::Declined
        };
        log::debug!("Overwrite gate decision: {:?}", decision);
        Ok(decision)
    }
}

#[cfg(test)]
#[path = "directory_test.rs"]
mod tests;
