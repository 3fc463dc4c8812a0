//! In-memory model of one parsed migration file

use crate::version::Version;
use std::fmt;

/// The two sections of a migration file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Forward statements, applied when migrating up
    Migration,
    /// Reverse statements, applied when rolling back
    Rollback,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Migration => write!(f, "migration"),
            Section::Rollback => write!(f, "rollback"),
        }
    }
}

/// One executable unit of a section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementUnit {
    /// Start-transaction delimiter
    Begin(String),
    /// End-transaction delimiter
    Commit(String),
    /// A complete SQL statement, possibly spanning several source lines
    Statement(String),
}

impl StatementUnit {
    /// SQL text passed to the database
    pub fn sql(&self) -> &str {
        match self {
            StatementUnit::Begin(s) | StatementUnit::Commit(s) | StatementUnit::Statement(s) => s,
        }
    }

    /// Whether this unit is a transaction delimiter
    pub fn is_delimiter(&self) -> bool {
        !matches!(self, StatementUnit::Statement(_))
    }
}

/// A parsed migration file.
///
/// Both sequences are non-empty and transaction-balanced; the parser is the
/// only constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationDocument {
    version: Version,
    forward: Vec<StatementUnit>,
    reverse: Vec<StatementUnit>,
}

impl MigrationDocument {
    pub(crate) fn new(
        version: Version,
        forward: Vec<StatementUnit>,
        reverse: Vec<StatementUnit>,
    ) -> Self {
        Self {
            version,
            forward,
            reverse,
        }
    }

    /// Version this document was parsed for
    pub fn version(&self) -> Version {
        self.version
    }

    /// Units applied when migrating up
    pub fn forward(&self) -> &[StatementUnit] {
        &self.forward
    }

    /// Units applied when rolling back
    pub fn reverse(&self) -> &[StatementUnit] {
        &self.reverse
    }

    /// Units of one section
    pub fn section(&self, section: Section) -> &[StatementUnit] {
        match section {
            Section::Migration => &self.forward,
            Section::Rollback => &self.reverse,
        }
    }

    /// Number of non-delimiter statements in a section
    pub fn statement_count(&self, section: Section) -> usize {
        self.section(section)
            .iter()
            .filter(|u| !u.is_delimiter())
            .count()
    }
}
