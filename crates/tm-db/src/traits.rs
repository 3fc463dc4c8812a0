//! Database trait definition

use crate::dialect::Dialect;
use crate::error::DbResult;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Serialize;
use tm_core::DbVersion;

/// One row of the version-tracking table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionRecord {
    /// Applied version
    pub version: DbVersion,

    /// When the version was recorded, if the backend reports it
    pub applied_at: Option<NaiveDateTime>,
}

/// Database abstraction trait for Tidemark
///
/// Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait Database: Send + Sync {
    /// Highest recorded version, or `UNINITIALIZED` when the version table
    /// does not exist
    async fn current_version(&self) -> DbResult<DbVersion>;

    /// Execute a single statement or transaction delimiter
    async fn execute(&self, sql: &str) -> DbResult<()>;

    /// All rows of the version table, ascending by version
    async fn history(&self) -> DbResult<Vec<VersionRecord>>;

    /// Dialect tokens and SQL templates for this backend
    fn dialect(&self) -> &dyn Dialect;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}
