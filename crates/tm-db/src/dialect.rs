//! SQL dialect abstraction

use tm_core::{Grammar, Version};

/// Tokens and version-table templates for one SQL dialect
pub trait Dialect: Send + Sync {
    /// Dialect name
    fn name(&self) -> &'static str;

    /// Line comment token
    fn comment(&self) -> &str;

    /// Statement terminator
    fn terminator(&self) -> &str;

    /// Token that opens a transaction
    fn start_transaction(&self) -> &str;

    /// Accepted spellings of the token that closes a transaction
    fn end_transaction(&self) -> &[&str];

    /// Name of the version-tracking table
    fn version_table(&self) -> &str;

    /// DDL creating the version-tracking table
    fn create_version_table(&self) -> String;

    /// DDL dropping the version-tracking table
    fn drop_version_table(&self) -> String;

    /// Statement recording `version` as applied
    fn insert_version(&self, version: Version) -> String;

    /// Statement removing the record of `version`
    fn delete_version(&self, version: Version) -> String;

    /// Parser grammar built from this dialect's tokens
    fn grammar(&self) -> Grammar {
        Grammar::new(
            self.comment(),
            self.terminator(),
            self.start_transaction(),
            self.end_transaction(),
        )
    }
}

/// DuckDB SQL dialect
#[derive(Debug, Clone)]
pub struct DuckDbDialect {
    version_table: String,
}

impl DuckDbDialect {
    /// Create a DuckDB dialect tracking versions in `version_table`
    pub fn new(version_table: &str) -> Self {
        Self {
            version_table: version_table.to_string(),
        }
    }
}

impl Default for DuckDbDialect {
    fn default() -> Self {
        Self::new("tidemark_version")
    }
}

impl Dialect for DuckDbDialect {
    fn name(&self) -> &'static str {
        "duckdb"
    }

    fn comment(&self) -> &str {
        "--"
    }

    fn terminator(&self) -> &str {
        ";"
    }

    fn start_transaction(&self) -> &str {
        "BEGIN TRANSACTION;"
    }

    fn end_transaction(&self) -> &[&str] {
        &["COMMIT;", "END TRANSACTION;"]
    }

    fn version_table(&self) -> &str {
        &self.version_table
    }

    fn create_version_table(&self) -> String {
        format!(
            "CREATE TABLE {} (version INTEGER PRIMARY KEY, applied_at TIMESTAMP NOT NULL DEFAULT current_timestamp);",
            self.version_table
        )
    }

    fn drop_version_table(&self) -> String {
        format!("DROP TABLE {};", self.version_table)
    }

    fn insert_version(&self, version: Version) -> String {
        format!(
            "INSERT INTO {} (version) VALUES ({});",
            self.version_table, version
        )
    }

    fn delete_version(&self, version: Version) -> String {
        format!(
            "DELETE FROM {} WHERE version = {};",
            self.version_table, version
        )
    }
}

#[cfg(test)]
#[path = "dialect_test.rs"]
mod tests;
