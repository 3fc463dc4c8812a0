//! Migration engine facade.
//!
//! [`Engine`] ties together the migration files, the parser, the router and
//! the executor for one database. Every operation reads the database's
//! current version fresh; nothing is cached between operations.

use crate::error::{EngineError, EngineResult};
use crate::executor::{Executor, Outcome};
use crate::migrations::{MigrationSet, ValidationReport};
use serde::Serialize;
use std::collections::BTreeMap;
use tm_core::{
    plan, DbVersion, MigrationFiles, Request, Route, Version, BOOTSTRAP_VERSION, UNINITIALIZED,
};
use tm_db::{Database, VersionRecord};

/// Database position relative to the migration files
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Status {
    /// Database type
    pub database: String,
    /// Current database version
    pub current: DbVersion,
    /// Highest version with a file
    pub latest: Option<Version>,
    /// Versions above the current one that have files
    pub pending: Vec<Version>,
}

/// Migration engine for one database and one set of migration files
pub struct Engine<'a> {
    migrations: MigrationSet<'a>,
    db: &'a dyn Database,
    verbose: bool,
}

impl<'a> Engine<'a> {
    /// Create an engine
    pub fn new(files: &'a dyn MigrationFiles, db: &'a dyn Database) -> Self {
        Self {
            migrations: MigrationSet::new(files, db.dialect()),
            db,
            verbose: false,
        }
    }

    /// Log every executed statement at debug level
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Write the bootstrap migration if it is missing and apply it when the
    /// database is uninitialized.
    pub async fn init(&self, quiet: bool) -> EngineResult<Outcome> {
        if !self.migrations.file_exists(BOOTSTRAP_VERSION) {
            self.migrations.write_scaffold(BOOTSTRAP_VERSION, quiet)?;
        }

        let current = self.db.current_version().await?;
        if current != UNINITIALIZED {
            if !quiet {
                log::info!("Database already initialized at version {}", current);
            }
            return Ok(Outcome::UpToDate(current));
        }

        let known = self.migrations.known_versions()?;
        let route = plan(
            current,
            &known,
            Request::Migrate(Some(DbVersion::from(BOOTSTRAP_VERSION))),
        )?;
        self.run(&route, false, quiet).await
    }

    /// See [`MigrationSet::scaffold`]
    pub fn scaffold(&self, version: Option<Version>) -> EngineResult<Version> {
        self.migrations.scaffold(version)
    }

    /// See [`MigrationSet::validate`]
    pub fn validate(
        &self,
        version: Option<Version>,
        check_sql: bool,
    ) -> EngineResult<Vec<ValidationReport>> {
        self.migrations.validate(version, check_sql)
    }

    /// Migrate up to `target`, by default one version.
    ///
    /// From an uninitialized database without a target, the bootstrap
    /// migration and the first real migration are both applied.
    pub async fn migrate(&self, target: Option<DbVersion>, dry_run: bool) -> EngineResult<Outcome> {
        let current = self.db.current_version().await?;
        let known = self.migrations.known_versions()?;

        let target = match target {
            None if current == UNINITIALIZED && known.contains(&(BOOTSTRAP_VERSION + 1)) => {
                Some(DbVersion::from(BOOTSTRAP_VERSION + 1))
            }
            other => other,
        };

        let route = plan(current, &known, Request::Migrate(target))?;
        self.run(&route, dry_run, false).await
    }

    /// Roll back to `target`, by default one version.
    pub async fn rollback(&self, target: Option<DbVersion>) -> EngineResult<Outcome> {
        let current = self.db.current_version().await?;
        let known = self.migrations.known_versions()?;
        let route = plan(current, &known, Request::Rollback(target))?;
        self.run(&route, false, false).await
    }

    /// Move to `target`, by default the latest version, in either direction.
    pub async fn update(&self, target: Option<DbVersion>) -> EngineResult<Outcome> {
        let current = self.db.current_version().await?;
        let known = self.migrations.known_versions()?;
        let route = plan(current, &known, Request::Update(target))?;
        self.run(&route, false, false).await
    }

    /// Current version and pending migrations
    pub async fn status(&self) -> EngineResult<Status> {
        let current = self.db.current_version().await?;
        let known = self.migrations.known_versions_or_empty()?;
        Ok(Status {
            database: self.db.db_type().to_string(),
            current,
            latest: known.last().copied(),
            pending: known
                .into_iter()
                .filter(|v| DbVersion::from(*v) > current)
                .collect(),
        })
    }

    /// Rows of the version table
    pub async fn history(&self) -> EngineResult<Vec<VersionRecord>> {
        if self.db.current_version().await? == UNINITIALIZED {
            return Err(EngineError::NotInitialized);
        }
        Ok(self.db.history().await?)
    }

    /// Parse every document on the route, then apply it.
    async fn run(&self, route: &Route, dry_run: bool, quiet: bool) -> EngineResult<Outcome> {
        log::debug!(
            "Route {} from {} to {}: {:?}",
            route.direction(),
            route.from(),
            route.to(),
            route.versions()
        );

        let mut documents = BTreeMap::new();
        for &version in route.versions() {
            documents.insert(version, self.migrations.load_document(version)?);
        }

        let outcome = Executor::new(self.db)
            .verbose(self.verbose && !quiet)
            .quiet(quiet)
            .on_statement(|sql| log::debug!("{}", sql))
            .apply(route, &documents, dry_run)
            .await?;

        let actual = self.db.current_version().await?;
        if actual != outcome.version() {
            log::warn!(
                "Database reports version {} after the run, expected {}. \
                 Check that each migration records its version.",
                actual,
                outcome.version()
            );
        }
        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
