//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Tidemark - numbered SQL migrations with a tracked database version
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
    /// Log every executed statement
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Named target from tidemark.yml
    #[arg(short, long, global = true, env = "TIDEMARK_TARGET")]
    pub target: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create tidemark.yml and the bootstrap migration, then apply it
    Init(InitArgs),

    /// Write a new migration file
    New(NewArgs),

    /// Check migration files without touching the database
    Validate(ValidateArgs),

    /// Apply migrations upward
    Migrate(MigrateArgs),

    /// Revert migrations downward
    Rollback(RollbackArgs),

    /// Move to a version in either direction (default: latest)
    Update(UpdateArgs),

    /// Show the current version and pending migrations
    Status(StatusArgs),

    /// List applied versions from the version table
    History(HistoryArgs),
}

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project name written to tidemark.yml (default: directory name)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the new command
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Version number (default: highest existing + 1)
    pub version: Option<u32>,
}

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Version to validate (default: all)
    pub version: Option<u32>,

    /// Also parse each statement with sqlparser
    #[arg(long)]
    pub check_sql: bool,
}

/// Arguments for the migrate command
#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Target version (default: one step up)
    #[arg(id = "to", long = "to")]
    pub target: Option<i64>,

    /// Apply and then revert, leaving the database unchanged
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the rollback command
#[derive(Args, Debug)]
pub struct RollbackArgs {
    /// Target version (default: one step down, -1 drops everything)
    #[arg(id = "to", long = "to", allow_negative_numbers = true)]
    pub target: Option<i64>,
}

/// Arguments for the update command
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Target version (default: latest)
    #[arg(id = "to", long = "to", allow_negative_numbers = true)]
    pub target: Option<i64>,
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: OutputFormat,
}

/// Arguments for the history command
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: OutputFormat,
}

/// Output formats for reporting commands
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned table
    Table,
    /// JSON output
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
