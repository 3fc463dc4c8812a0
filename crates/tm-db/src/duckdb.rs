//! DuckDB database backend implementation

use crate::dialect::{Dialect, DuckDbDialect};
use crate::error::{DbError, DbResult};
use crate::traits::{Database, VersionRecord};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use duckdb::Connection;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tm_core::{DbVersion, UNINITIALIZED};

/// DuckDB database backend
pub struct DuckDbBackend {
    conn: Mutex<Connection>,
    dialect: DuckDbDialect,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory(dialect: DuckDbDialect) -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
            dialect,
        })
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path, dialect: DuckDbDialect) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{}: {}", e, path.display())))?;
        Ok(Self {
            conn: Mutex::new(conn),
            dialect,
        })
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str, dialect: DuckDbDialect) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory(dialect)
        } else {
            Self::from_path(Path::new(path), dialect)
        }
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))
    }

    /// Execute SQL synchronously
    fn execute_sync(&self, sql: &str) -> DbResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(sql)
            .map_err(|e| DbError::ExecutionError {
                message: e.to_string(),
                sql: sql.to_string(),
            })
    }

    /// Check if the version table exists synchronously
    fn version_table_exists_sync(&self, conn: &Connection) -> DbResult<bool> {
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = 'main' AND table_name = ?",
                [self.dialect.version_table()],
                |row| row.get(0),
            )
            .map_err(|e| DbError::VersionQueryError(e.to_string()))?;
        Ok(count > 0)
    }

    /// Read the current version synchronously
    fn current_version_sync(&self) -> DbResult<DbVersion> {
        let conn = self.lock()?;
        if !self.version_table_exists_sync(&conn)? {
            return Ok(UNINITIALIZED);
        }
        let sql = format!(
            "SELECT CAST(COALESCE(MAX(version), {}) AS BIGINT) FROM {}",
            UNINITIALIZED,
            self.dialect.version_table()
        );
        conn.query_row(&sql, [], |row| row.get(0))
            .map_err(|e| DbError::VersionQueryError(e.to_string()))
    }

    /// Read all version rows synchronously
    fn history_sync(&self) -> DbResult<Vec<VersionRecord>> {
        let conn = self.lock()?;
        if !self.version_table_exists_sync(&conn)? {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT CAST(version AS BIGINT), CAST(applied_at AS VARCHAR) FROM {} ORDER BY version",
            self.dialect.version_table()
        );
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DbError::VersionQueryError(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| {
                let version: i64 = row.get(0)?;
                let applied_at: Option<String> = row.get(1)?;
                Ok((version, applied_at))
            })
            .map_err(|e| DbError::VersionQueryError(e.to_string()))?;

        let mut records = Vec::new();
        for row in rows {
            let (version, applied_at) =
                row.map_err(|e| DbError::VersionQueryError(e.to_string()))?;
            records.push(VersionRecord {
                version,
                applied_at: applied_at.as_deref().and_then(parse_timestamp),
            });
        }
        Ok(records)
    }
}

/// Parse DuckDB's text rendering of a TIMESTAMP
fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").ok()
}

#[async_trait]
impl Database for DuckDbBackend {
    async fn current_version(&self) -> DbResult<DbVersion> {
        self.current_version_sync()
    }

    async fn execute(&self, sql: &str) -> DbResult<()> {
        self.execute_sync(sql)
    }

    async fn history(&self) -> DbResult<Vec<VersionRecord>> {
        self.history_sync()
    }

    fn dialect(&self) -> &dyn Dialect {
        &self.dialect
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
