//! Offline operations on the migration files.
//!
//! [`MigrationSet`] needs only the files and the dialect, so scaffolding and
//! validation never open a database connection.

use crate::error::{EngineError, EngineResult};
use crate::scaffold::render_migration;
use crate::sql_check::check_document;
use serde::Serialize;
use std::collections::BTreeSet;
use tm_core::{
    CoreError, Grammar, MigrationDocument, MigrationFiles, Parser, Version, BOOTSTRAP_VERSION,
};
use tm_db::Dialect;

/// Validation result for one migration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Version checked
    pub version: Version,
    /// Why the file is invalid, if it is
    pub error: Option<String>,
}

impl ValidationReport {
    /// Whether the file passed
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

/// Migration files read and written through one dialect's grammar
pub struct MigrationSet<'a> {
    files: &'a dyn MigrationFiles,
    dialect: &'a dyn Dialect,
    grammar: Grammar,
}

impl<'a> MigrationSet<'a> {
    pub fn new(files: &'a dyn MigrationFiles, dialect: &'a dyn Dialect) -> Self {
        Self {
            files,
            dialect,
            grammar: dialect.grammar(),
        }
    }

    /// Write a new migration file and return its version.
    ///
    /// Without a version, the next one after the highest existing file is
    /// used.
    pub fn scaffold(&self, version: Option<Version>) -> EngineResult<Version> {
        let version = match version {
            Some(v) => v,
            None => match self.known_versions_or_empty()?.last() {
                Some(&last) => last
                    .checked_add(1)
                    .ok_or(CoreError::VersionsExhausted { last })?,
                None => BOOTSTRAP_VERSION,
            },
        };

        self.write_scaffold(version, false)?;
        Ok(version)
    }

    pub(crate) fn write_scaffold(&self, version: Version, quiet: bool) -> EngineResult<()> {
        if self.files.file_exists(version) {
            return Err(CoreError::MigrationFileExists {
                version,
                path: self.files.path_for(version).display().to_string(),
            }
            .into());
        }

        let content = render_migration(version, self.dialect, chrono::Local::now().naive_local())?;
        self.files.write_file(version, &content)?;
        if !quiet {
            log::info!("Created {}", self.files.path_for(version).display());
        }
        Ok(())
    }

    /// Parse one migration file, or every file when `version` is `None`.
    ///
    /// Structural problems are reported, not returned as errors. With
    /// `check_sql`, statements are also run through sqlparser.
    pub fn validate(
        &self,
        version: Option<Version>,
        check_sql: bool,
    ) -> EngineResult<Vec<ValidationReport>> {
        let versions: Vec<Version> = match version {
            Some(v) => {
                if !self.files.file_exists(v) {
                    return Err(CoreError::MissingMigrationFile { version: v }.into());
                }
                vec![v]
            }
            None => self.files.known_versions()?.into_iter().collect(),
        };

        let mut reports = Vec::with_capacity(versions.len());
        for v in versions {
            let error = match self.load_document(v) {
                Ok(document) if check_sql => self.sql_issues(&document),
                Ok(_) => None,
                Err(EngineError::Core(e)) if e.is_structural() => Some(e.to_string()),
                Err(e) => return Err(e),
            };
            reports.push(ValidationReport { version: v, error });
        }
        Ok(reports)
    }

    fn sql_issues(&self, document: &MigrationDocument) -> Option<String> {
        let issues = check_document(document, self.dialect.name());
        if issues.is_empty() {
            return None;
        }
        Some(
            issues
                .iter()
                .map(|i| format!("{} section: {} ({})", i.section, i.message, i.statement))
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }

    /// Versions with a file; a missing directory counts as empty
    pub fn known_versions_or_empty(&self) -> EngineResult<BTreeSet<Version>> {
        match self.files.known_versions() {
            Ok(known) => Ok(known),
            Err(CoreError::MigrationsDirNotFound { .. }) => Ok(BTreeSet::new()),
            Err(e) => Err(e.into()),
        }
    }

    pub(crate) fn known_versions(&self) -> EngineResult<BTreeSet<Version>> {
        Ok(self.files.known_versions()?)
    }

    pub(crate) fn file_exists(&self, version: Version) -> bool {
        self.files.file_exists(version)
    }

    /// Read and parse the file for `version`
    pub fn load_document(&self, version: Version) -> EngineResult<MigrationDocument> {
        let lines = self.files.read_file(version)?;
        Ok(Parser::new(&self.grammar).parse(version, &lines)?)
    }
}

#[cfg(test)]
#[path = "migrations_test.rs"]
mod tests;
