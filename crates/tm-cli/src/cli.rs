//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Tidemark - mirror remote migration history into local SQL files
#[derive(Parser, Debug)]
#[command(name = "tm")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override target (named database connection)
    #[arg(short, long, global = true)]
    pub target: Option<String>,

    /// PostgreSQL connection URL; replaces the configured database
    #[arg(long, global = true, env = "TM_DB_URL", hide_env_values = true)]
    pub db_url: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new Tidemark project
    Init(InitArgs),

    /// Write every remote migration to the local migrations directory
    Fetch(FetchArgs),

    /// List the remote migration history
    History(HistoryArgs),
}

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project name, also used as the directory name
    pub name: String,

    /// Read history from a DuckDB file instead of PostgreSQL
    #[arg(long)]
    pub duckdb: Option<String>,
}

/// Arguments for the fetch command
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Overwrite existing files without asking
    #[arg(short, long)]
    pub yes: bool,

    /// Override the migrations directory
    #[arg(short, long)]
    pub dir: Option<String>,
}

/// Arguments for the history command
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: HistoryOutput,
}

/// History output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryOutput {
    /// Table format
    Table,
    /// JSON output
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
