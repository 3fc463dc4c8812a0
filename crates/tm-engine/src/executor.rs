//! Transactional executor.
//!
//! Applies a route's statements against a [`Database`] strictly in route
//! order. Transaction delimiters are executed like any other statement; the
//! backend honors them. A failing statement aborts the rest of the route
//! and the error is returned unchanged. Steps already applied are not
//! compensated.

use crate::error::{EngineError, EngineResult};
use std::collections::BTreeMap;
use std::fmt;
use tm_core::{DbVersion, Direction, MigrationDocument, Route, Section, Version, UNINITIALIZED};
use tm_db::Database;

/// Callback receiving each statement before it runs
pub type StatementCallback<'a> = Box<dyn Fn(&str) + Send + Sync + 'a>;

/// Result of a migrate, rollback or update request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Forward route applied, database now at this version
    MigratedTo(DbVersion),
    /// Reverse route applied (or a dry run reverted), database at this version
    RolledBackTo(DbVersion),
    /// Nothing to do, database already at this version
    UpToDate(DbVersion),
}

impl Outcome {
    /// Database version after the request
    pub fn version(&self) -> DbVersion {
        match self {
            Outcome::MigratedTo(v) | Outcome::RolledBackTo(v) | Outcome::UpToDate(v) => *v,
        }
    }
}

fn describe(version: DbVersion) -> String {
    if version == UNINITIALIZED {
        "the uninitialized state".to_string()
    } else {
        format!("version {}", version)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::MigratedTo(v) => write!(f, "Migrated to {}", describe(*v)),
            Outcome::RolledBackTo(v) => write!(f, "Rolled back to {}", describe(*v)),
            Outcome::UpToDate(v) => write!(f, "Already up to date at {}", describe(*v)),
        }
    }
}

/// Applies routes against one database
pub struct Executor<'a> {
    db: &'a dyn Database,
    verbose: bool,
    quiet: bool,
    on_statement: Option<StatementCallback<'a>>,
}

impl<'a> Executor<'a> {
    /// Create an executor for `db`
    pub fn new(db: &'a dyn Database) -> Self {
        Self {
            db,
            verbose: false,
            quiet: false,
            on_statement: None,
        }
    }

    /// Pass each statement to the callback before executing it
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Suppress per-version progress logging
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Set the statement callback used in verbose mode
    pub fn on_statement<F>(mut self, callback: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'a,
    {
        self.on_statement = Some(Box::new(callback));
        self
    }

    /// Apply `route` using the parsed `documents`.
    ///
    /// With `dry_run` on an upward route, the forward route is applied and
    /// then fully reverted; the reported outcome is the rollback.
    pub async fn apply(
        &self,
        route: &Route,
        documents: &BTreeMap<Version, MigrationDocument>,
        dry_run: bool,
    ) -> EngineResult<Outcome> {
        if route.is_empty() {
            return Ok(Outcome::UpToDate(route.from()));
        }

        self.run_route(route, documents).await?;

        if dry_run && route.direction() == Direction::Up {
            let back = route.reversed();
            if !self.quiet {
                log::info!("Dry run: reverting to {}", describe(back.to()));
            }
            self.run_route(&back, documents).await?;
            return Ok(Outcome::RolledBackTo(back.to()));
        }

        Ok(match route.direction() {
            Direction::Up => Outcome::MigratedTo(route.to()),
            Direction::Down => Outcome::RolledBackTo(route.to()),
        })
    }

    async fn run_route(
        &self,
        route: &Route,
        documents: &BTreeMap<Version, MigrationDocument>,
    ) -> EngineResult<()> {
        for &version in route.versions() {
            let document = documents
                .get(&version)
                .ok_or(EngineError::MissingDocument(version))?;
            let section = match route.direction() {
                Direction::Up => Section::Migration,
                Direction::Down => Section::Rollback,
            };
            let units = document.section(section);

            if !self.quiet {
                let count = document.statement_count(section);
                let action = match route.direction() {
                    Direction::Up => "Applying",
                    Direction::Down => "Rolling back",
                };
                log::info!("{} migration {} ({} statements)", action, version, count);
            }

            for unit in units {
                let sql = unit.sql().trim();
                if self.verbose {
                    if let Some(callback) = &self.on_statement {
                        callback(sql);
                    }
                }
                self.db.execute(sql).await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "executor_test.rs"]
mod tests;
