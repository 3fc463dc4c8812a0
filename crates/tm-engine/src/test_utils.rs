//! Shared helpers for unit tests

use async_trait::async_trait;
use std::sync::Mutex;
use tm_core::{DbVersion, Grammar, MigrationDocument, UNINITIALIZED};
use tm_db::{Database, DbError, DbResult, Dialect, DuckDbDialect, VersionRecord};

/// Database double that records every executed statement
pub(crate) struct RecordingDb {
    pub executed: Mutex<Vec<String>>,
    pub version: Mutex<DbVersion>,
    fail_on: Option<String>,
    dialect: DuckDbDialect,
}

impl RecordingDb {
    pub fn new() -> Self {
        Self {
            executed: Mutex::new(Vec::new()),
            version: Mutex::new(UNINITIALIZED),
            fail_on: None,
            dialect: DuckDbDialect::default(),
        }
    }

    pub fn failing_on(sql: &str) -> Self {
        Self {
            fail_on: Some(sql.to_string()),
            ..Self::new()
        }
    }

    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }
}

#[async_trait]
impl Database for RecordingDb {
    async fn current_version(&self) -> DbResult<DbVersion> {
        Ok(*self.version.lock().unwrap())
    }

    async fn execute(&self, sql: &str) -> DbResult<()> {
        if self.fail_on.as_deref() == Some(sql) {
            return Err(DbError::ExecutionError {
                message: "boom".to_string(),
                sql: sql.to_string(),
            });
        }
        self.executed.lock().unwrap().push(sql.to_string());
        Ok(())
    }

    async fn history(&self) -> DbResult<Vec<VersionRecord>> {
        Ok(Vec::new())
    }

    fn dialect(&self) -> &dyn Dialect {
        &self.dialect
    }

    fn db_type(&self) -> &'static str {
        "recording"
    }
}

pub(crate) fn grammar() -> Grammar {
    DuckDbDialect::default().grammar()
}

/// A one-statement document for `version`
pub(crate) fn document(version: u32) -> MigrationDocument {
    let text = format!(
        "-- start migration\nBEGIN TRANSACTION;\nUP {v};\nCOMMIT;\n-- end migration\n\
         -- start rollback\nBEGIN TRANSACTION;\nDOWN {v};\nCOMMIT;\n-- end rollback\n",
        v = version
    );
    let lines: Vec<&str> = text.lines().collect();
    tm_core::parse(version, &lines, &grammar()).unwrap()
}
