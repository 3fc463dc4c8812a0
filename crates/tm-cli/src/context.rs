//! Runtime context for CLI commands

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tm_core::{Config, DbType, Dialect, FsMigrationFiles};
use tm_db::{Database, DuckDbBackend, DuckDbDialect};
use tm_engine::{Engine, MigrationSet};

use crate::cli::GlobalArgs;

/// Loaded configuration and migration files.
///
/// The database is only opened by [`RuntimeContext::connect`], so commands
/// that work on files alone never create it.
pub(crate) struct RuntimeContext {
    /// The loaded configuration
    pub config: Config,

    /// Migration file store
    pub files: FsMigrationFiles,

    /// Dialect selected by the configuration
    pub dialect: DuckDbDialect,

    /// Database type of the selected target
    db_type: DbType,

    /// Resolved database path of the selected target
    db_path: String,

    /// Verbose output enabled
    pub verbose: bool,
}

impl RuntimeContext {
    /// Create a new runtime context from global arguments
    pub fn new(args: &GlobalArgs) -> Result<Self> {
        let project_path = Path::new(&args.project_dir);

        let config = if let Some(config_path) = &args.config {
            Config::load(Path::new(config_path)).context("Failed to load configuration file")?
        } else {
            Config::load_from_dir(project_path).context("Failed to load project configuration")?
        };

        Self::from_config(config, project_path, args)
    }

    /// Build the context from an already loaded configuration
    pub fn from_config(config: Config, project_path: &Path, args: &GlobalArgs) -> Result<Self> {
        let database = config.database_for(args.target.as_deref())?;
        let db_type = database.db_type;
        let db_path = resolve_db_path(project_path, &database.path);
        log::debug!(
            "Using {} database at {} (target: {})",
            db_type,
            db_path,
            args.target.as_deref().unwrap_or("default")
        );

        let dialect = match config.dialect {
            Dialect::DuckDb => DuckDbDialect::new(&config.version_table),
        };
        let files = FsMigrationFiles::new(config.migrations_path_absolute(project_path));

        Ok(Self {
            config,
            files,
            dialect,
            db_type,
            db_path,
            verbose: args.verbose,
        })
    }

    /// Open the target database, creating a file database if needed
    pub fn connect(&self) -> Result<DuckDbBackend> {
        match self.db_type {
            DbType::DuckDb => DuckDbBackend::new(&self.db_path, self.dialect.clone())
                .with_context(|| format!("Failed to connect to database: {}", self.db_path)),
        }
    }

    /// Migration files read through the configured dialect
    pub fn migrations(&self) -> MigrationSet<'_> {
        MigrationSet::new(&self.files, &self.dialect)
    }

    /// Migration engine over this context's files and `db`
    pub fn engine<'a>(&'a self, db: &'a dyn Database) -> Engine<'a> {
        Engine::new(&self.files, db).verbose(self.verbose)
    }
}

/// File databases are relative to the project directory
fn resolve_db_path(project_path: &Path, path: &str) -> String {
    if path == ":memory:" || Path::new(path).is_absolute() {
        return path.to_string();
    }
    let joined: PathBuf = project_path.join(path);
    joined.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tm_db::Dialect as _;

    fn global(project_dir: &Path) -> GlobalArgs {
        GlobalArgs {
            verbose: false,
            project_dir: project_dir.display().to_string(),
            config: None,
            target: None,
        }
    }

    #[test]
    fn test_resolve_db_path() {
        let root = Path::new("/srv/app");
        assert_eq!(resolve_db_path(root, ":memory:"), ":memory:");
        assert_eq!(resolve_db_path(root, "/data/app.duckdb"), "/data/app.duckdb");
        assert_eq!(
            resolve_db_path(root, "tidemark.duckdb"),
            "/srv/app/tidemark.duckdb"
        );
    }

    #[test]
    fn test_context_defers_connection() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::new("shop");
        config.version_table = "schema_log".to_string();

        let ctx = RuntimeContext::from_config(config, dir.path(), &global(dir.path())).unwrap();
        assert_eq!(ctx.dialect.version_table(), "schema_log");
        assert!(!dir.path().join("tidemark.duckdb").exists());

        let db = ctx.connect().unwrap();
        assert_eq!(db.dialect().version_table(), "schema_log");
        assert!(dir.path().join("tidemark.duckdb").exists());
    }
}
