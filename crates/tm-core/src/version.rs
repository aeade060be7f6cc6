//! Strongly-typed migration version wrapper.

use chrono::NaiveDateTime;
use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

/// Layout of timestamp-derived versions, e.g. `20230101120000`.
const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Identifier of one applied migration.
///
/// Versions are compared as plain strings. Timestamp-derived versions sort
/// chronologically under that ordering, which is what the bookkeeping table
/// relies on. Any text is accepted as-is, including the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MigrationVersion(String);

impl MigrationVersion {
    /// Wrap a version exactly as recorded
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }

    /// Interpret the version as a `YYYYMMDDHHMMSS` timestamp.
    ///
    /// Returns `None` for versions that are not timestamp-derived.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.0, TIMESTAMP_FORMAT).ok()
    }
}

impl fmt::Display for MigrationVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MigrationVersion {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for MigrationVersion {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for MigrationVersion {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for MigrationVersion {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for MigrationVersion {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl PartialEq<String> for MigrationVersion {
    fn eq(&self, other: &String) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
#[path = "version_test.rs"]
mod tests;
