//! End-to-end fetch orchestration

use crate::directory::{prepare_directory, ConflictGate};
use crate::error::SyncResult;
use crate::history::HistoryReader;
use crate::prompt::Confirm;
use crate::storage::Storage;
use crate::writer::ArtifactWriter;
use std::future::Future;
use std::path::{Path, PathBuf};
use tm_db::Connector;

/// How a fetch run ended when it did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Every history record was written; paths are in record order
    Written(Vec<PathBuf>),
    /// The directory had files and the operator chose not to overwrite them
    Declined,
}

/// Mirror the remote migration history into `dir`.
///
/// The directory is created if needed. When it already has entries the
/// operator is asked through `confirm`; declining returns
/// [`FetchOutcome::Declined`] before any connection is made. All rows are
/// decoded before the first file is written, so a bad row leaves the
/// directory untouched. `shutdown` cancels the connect and query stages.
pub async fn fetch<F>(
    dir: &Path,
    storage: &dyn Storage,
    confirm: &mut dyn Confirm,
    connector: &dyn Connector,
    shutdown: F,
) -> SyncResult<FetchOutcome>
where
    F: Future<Output = ()>,
{
    prepare_directory(storage, dir)?;

    let decision = ConflictGate::new(storage, confirm).check(dir)?;
    if !decision.proceed() {
        log::debug!("Fetch declined; {} left unchanged", dir.display());
        return Ok(FetchOutcome::Declined);
    }

    let records = HistoryReader::new(connector).read(shutdown).await?;
    let written = ArtifactWriter::new(storage, dir).write_all(&records)?;
    log::debug!("Fetched {} migrations into {}", written.len(), dir.display());

    Ok(FetchOutcome::Written(written))
}

#[cfg(test)]
#[path = "fetch_test.rs"]
mod tests;
