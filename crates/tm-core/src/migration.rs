//! Migration history records and their on-disk SQL artifacts

use crate::version::MigrationVersion;

/// Fully-qualified name of the remote migration bookkeeping table.
pub const HISTORY_TABLE: &str = "supabase_migrations.schema_migrations";

/// Separator placed between statements and after the last one.
pub const STATEMENT_TERMINATOR: &str = ";\n";

/// One applied migration as recorded in the bookkeeping table.
///
/// Records are immutable once built. Each one maps to exactly one artifact
/// file named `{version}_{name}.sql`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationRecord {
    version: MigrationVersion,
    name: String,
    statements: Vec<String>,
}

impl MigrationRecord {
    /// Create a record; statement order is kept exactly as given.
    pub fn new(version: MigrationVersion, name: impl Into<String>, statements: Vec<String>) -> Self {
        Self {
            version,
            name: name.into(),
            statements,
        }
    }

    /// The migration version
    pub fn version(&self) -> &MigrationVersion {
        &self.version
    }

    /// The descriptive migration name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// SQL statements in original application order, without terminators
    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    /// Artifact file name: `{version}_{name}.sql`.
    ///
    /// No sanitization is applied to either component.
    pub fn file_name(&self) -> String {
        format!("{}_{}.sql", self.version, self.name)
    }

    /// Artifact contents.
    ///
    /// Statements are joined with `";\n"` and one more `";\n"` is appended,
    /// so an empty statement list renders as exactly `";\n"`.
    pub fn render(&self) -> String {
        let mut contents = self.statements.join(STATEMENT_TERMINATOR);
        contents.push_str(STATEMENT_TERMINATOR);
        contents
    }
}

#[cfg(test)]
#[path = "migration_test.rs"]
mod tests;
