//! Filesystem capability used by the pipeline

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Permission bits for written migration files (rw-r--r--)
pub const ARTIFACT_MODE: u32 = 0o644;

/// The storage operations the pipeline needs.
///
/// [`FsStorage`] is the real implementation; tests substitute their own to
/// inject failures.
pub trait Storage: Send + Sync {
    /// Create `path` and any missing parents; succeed if it already exists
    fn ensure_dir(&self, path: &Path) -> io::Result<()>;

    /// True when the directory has no entries
    fn is_empty(&self, path: &Path) -> io::Result<bool>;

    /// Create or truncate `path` and write `contents` to it
    fn write_file(&self, path: &Path, contents: &[u8], mode: u32) -> io::Result<()>;
}

/// Local filesystem storage
#[derive(Debug, Default, Clone, Copy)]
pub struct FsStorage;

impl Storage for FsStorage {
    fn ensure_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn is_empty(&self, path: &Path) -> io::Result<bool> {
        match fs::read_dir(path)?.next() {
            None => Ok(true),
            Some(Ok(_)) => Ok(false),
            Some(Err(e)) => Err(e),
        }
    }

    /// `mode` applies when the file is created; an existing file keeps its
    /// permissions and only has its contents replaced.
    fn write_file(&self, path: &Path, contents: &[u8], mode: u32) -> io::Result<()> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(mode);
        }
        #[cfg(not(unix))]
        let _ = mode;

        let mut file = options.open(path)?;
        file.write_all(contents)?;
        file.flush()
    }
}

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;
