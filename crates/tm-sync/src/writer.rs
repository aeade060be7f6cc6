//! Write migration records to the local directory

use crate::error::{SyncError, SyncResult};
use crate::storage::{Storage, ARTIFACT_MODE};
use std::path::{Path, PathBuf};
use tm_core::MigrationRecord;

/// Writes one `{version}_{name}.sql` file per record into a directory
pub struct ArtifactWriter<'a> {
    storage: &'a dyn Storage,
    dir: &'a Path,
}

impl<'a> ArtifactWriter<'a> {
    /// Writer targeting `dir`
    pub fn new(storage: &'a dyn Storage, dir: &'a Path) -> Self {
        Self { storage, dir }
    }

    /// Destination path for `record`
    pub fn path_for(&self, record: &MigrationRecord) -> PathBuf {
        self.dir.join(record.file_name())
    }

    /// Write every record in order, stopping at the first failure.
    ///
    /// Files written before the failure are left in place. Records that
    /// share a file name overwrite each other; the last one wins.
    pub fn write_all(&self, records: &[MigrationRecord]) -> SyncResult<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(records.len());
        for record in records {
            let path = self.path_for(record);
            self.storage
                .write_file(&path, record.render().as_bytes(), ARTIFACT_MODE)
                .map_err(|e| SyncError::Write {
                    path: path.display().to_string(),
                    source: e,
                })?;
            log::debug!(
                "Wrote {} ({} statements)",
                path.display(),
                record.statements().len()
            );
            written.push(path);
        }
        Ok(written)
    }
}

#[cfg(test)]
#[path = "writer_test.rs"]
mod tests;
