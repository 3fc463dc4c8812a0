//! Optional syntax check of migration statements with sqlparser

use sqlparser::dialect::{Dialect as ParserDialect, DuckDbDialect, GenericDialect};
use sqlparser::parser::Parser;
use tm_core::{MigrationDocument, Section};

/// A statement sqlparser rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlIssue {
    /// Section holding the statement
    pub section: Section,
    /// The statement text
    pub statement: String,
    /// Parser message
    pub message: String,
}

/// Pick the sqlparser dialect for a Tidemark dialect name
fn parser_dialect(name: &str) -> Box<dyn ParserDialect> {
    match name {
        "duckdb" => Box::new(DuckDbDialect {}),
        _ => Box::new(GenericDialect {}),
    }
}

/// Parse every non-delimiter statement of both sections.
pub fn check_document(document: &MigrationDocument, dialect_name: &str) -> Vec<SqlIssue> {
    let dialect = parser_dialect(dialect_name);
    let mut issues = Vec::new();
    for section in [Section::Migration, Section::Rollback] {
        for unit in document.section(section).iter().filter(|u| !u.is_delimiter()) {
            if let Err(e) = Parser::parse_sql(dialect.as_ref(), unit.sql()) {
                issues.push(SqlIssue {
                    section,
                    statement: unit.sql().to_string(),
                    message: e.to_string(),
                });
            }
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::grammar;

    fn doc(forward: &str) -> MigrationDocument {
        let text = format!(
            "-- start migration\nBEGIN TRANSACTION;\n{}\nCOMMIT;\n-- end migration\n\
             -- start rollback\nBEGIN TRANSACTION;\nDROP TABLE t;\nCOMMIT;\n-- end rollback",
            forward
        );
        let lines: Vec<&str> = text.lines().collect();
        tm_core::parse(1, &lines, &grammar()).unwrap()
    }

    #[test]
    fn test_valid_statements_pass() {
        let issues = check_document(
            &doc("CREATE TABLE t (id INTEGER, name VARCHAR);\nINSERT INTO t VALUES (1, 'a');"),
            "duckdb",
        );
        assert!(issues.is_empty(), "{issues:?}");
    }

    #[test]
    fn test_syntax_error_reported() {
        let issues = check_document(&doc("CREATE TABEL t (id INTEGER);"), "duckdb");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].section, Section::Migration);
        assert_eq!(issues[0].statement, "CREATE TABEL t (id INTEGER);");
        assert!(!issues[0].message.is_empty());
    }
}
