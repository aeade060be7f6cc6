//! Runtime context for CLI commands

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tm_core::{Config, CoreError, DatabaseConfig, DbType};
use tm_db::{connector_from_config, Connector};

use crate::cli::GlobalArgs;

/// Project settings resolved from the config file, target, and CLI overrides
pub struct RuntimeContext {
    /// Project root directory
    pub root: PathBuf,

    /// Loaded (or default) project configuration
    pub config: Config,

    /// Active target, if any
    pub target: Option<String>,

    /// Database settings after target and `--db-url` overrides
    pub database: DatabaseConfig,

    /// Verbose output enabled
    pub verbose: bool,
}

impl RuntimeContext {
    /// Create a new runtime context from global arguments
    pub fn new(args: &GlobalArgs) -> Result<Self> {
        let root = PathBuf::from(&args.project_dir);
        let config = load_config(args, &root)?;
        let target = Config::resolve_target(args.target.as_deref());

        let mut database = config
            .get_database_config(target.as_deref())
            .context("Failed to resolve database configuration")?;
        if let Some(url) = &args.db_url {
            database.db_type = DbType::Postgres;
            database.url = Some(url.clone());
        }
        if database.db_type == DbType::DuckDb {
            // Relative DuckDB paths are relative to the project, not the cwd
            if let Some(path) = database.path.as_deref().filter(|p| *p != ":memory:") {
                database.path = Some(root.join(path).display().to_string());
            }
        }

        Ok(Self {
            root,
            config,
            target,
            database,
            verbose: args.verbose,
        })
    }

    /// Migrations directory, honoring a `--dir` override
    pub fn migrations_dir(&self, dir_override: Option<&str>) -> Result<PathBuf> {
        match dir_override {
            Some(dir) => Ok(self.root.join(dir)),
            None => self
                .config
                .migrations_dir_absolute(&self.root, self.target.as_deref())
                .context("Failed to resolve migrations directory"),
        }
    }

    /// Connector for the resolved database
    pub fn connector(&self) -> Result<Box<dyn Connector>> {
        connector_from_config(&self.database).with_context(|| {
            format!(
                "Failed to configure {} connection to {}",
                self.database.db_type,
                self.database.endpoint()
            )
        })
    }

    /// Print verbose output if enabled
    pub fn verbose(&self, msg: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", msg);
        }
    }
}

/// Load the config file; with `--db-url` a missing file falls back to defaults.
fn load_config(args: &GlobalArgs, root: &Path) -> Result<Config> {
    if let Some(config_path) = &args.config {
        return Config::load(Path::new(config_path)).context("Failed to load configuration file");
    }

    match Config::load_from_dir(root) {
        Ok(config) => Ok(config),
        Err(CoreError::ConfigNotFound { .. }) if args.db_url.is_some() => {
            let name = root
                .canonicalize()
                .ok()
                .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
                .unwrap_or_else(|| "tidemark".to_string());
            Ok(Config::new(name))
        }
        Err(e) => Err(e).context("Failed to load project configuration"),
    }
}

#[cfg(test)]
#[path = "context_test.rs"]
mod tests;
