//! Error types for tm-core

use crate::document::Section;
use crate::version::{DbVersion, Version};
use thiserror::Error;

/// Core error type for Tidemark
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Invalid configuration value
    #[error("[E002] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E003: Unknown named target
    #[error("[E003] Unknown target '{name}'. Available targets: {available}")]
    UnknownTarget { name: String, available: String },

    /// E004: Migrations directory not found
    #[error("[E004] Migrations directory not found: {path}")]
    MigrationsDirNotFound { path: String },

    /// E005: Migration file already exists
    #[error("[E005] Migration file for version {version} already exists: {path}")]
    MigrationFileExists { version: Version, path: String },

    /// E006: IO error
    #[error("[E006] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// E007: IO error with file path context
    #[error("[E007] Failed to access '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// E008: YAML parse error
    #[error("[E008] Config parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// E009: No version left after the highest migration file
    #[error("[E009] Cannot number a new migration after {last}: version limit reached")]
    VersionsExhausted { last: Version },

    /// P001: A required section marker is absent
    #[error("[P001] Migration {version}: missing {section} section")]
    MissingSection { version: Version, section: Section },

    /// P002: A section was opened and never closed
    #[error("[P002] Migration {version}: {section} section is never closed")]
    OpenSection { version: Version, section: Section },

    /// P003: A transaction was opened and never closed
    #[error("[P003] Migration {version}: transaction in {section} section is never closed")]
    OpenTransaction { version: Version, section: Section },

    /// P004: A line appears where the grammar requires something else
    #[error("[P004] Migration {version}: invalid line '{line}': {reason}")]
    InvalidFormat {
        version: Version,
        line: String,
        reason: String,
    },

    /// R001: A version on the route has no migration file
    #[error("[R001] Migration file for version {version} does not exist")]
    MissingMigrationFile { version: Version },

    /// R002: Migrate target below the current version
    #[error("[R002] Cannot migrate to a lower version: current version is {current}, target is {target}")]
    InvalidMigration { current: DbVersion, target: DbVersion },

    /// R003: Rollback target above the current version, or nothing to roll back
    #[error("[R003] Cannot rollback: {reason} (current version is {current}, target is {target})")]
    InvalidRollback {
        current: DbVersion,
        target: DbVersion,
        reason: String,
    },
}

impl CoreError {
    /// True for errors raised by the migration file parser
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            CoreError::MissingSection { .. }
                | CoreError::OpenSection { .. }
                | CoreError::OpenTransaction { .. }
                | CoreError::InvalidFormat { .. }
        )
    }

    /// True for errors raised by the version router
    pub fn is_routing(&self) -> bool {
        matches!(
            self,
            CoreError::MissingMigrationFile { .. }
                | CoreError::InvalidMigration { .. }
                | CoreError::InvalidRollback { .. }
        )
    }
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
