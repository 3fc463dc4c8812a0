//! Tokens and marker lines recognized by the migration file parser.
//!
//! A [`Grammar`] is built once from a dialect's comment, terminator and
//! transaction tokens and passed by reference into the parser and the
//! scaffold renderer, so both agree on the exact marker spelling.

use crate::document::Section;

/// Phrase following the comment token on the start-migration marker
pub const START_MIGRATION_PHRASE: &str = "start migration";
/// Phrase following the comment token on the end-migration marker
pub const END_MIGRATION_PHRASE: &str = "end migration";
/// Phrase following the comment token on the start-rollback marker
pub const START_ROLLBACK_PHRASE: &str = "start rollback";
/// Phrase following the comment token on the end-rollback marker
pub const END_ROLLBACK_PHRASE: &str = "end rollback";

/// A recognized marker line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// Opens a section
    Start(Section),
    /// Closes a section
    End(Section),
}

/// Marker strings and statement tokens for one dialect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    comment: String,
    terminator: String,
    start_transaction: String,
    end_transaction: Vec<String>,
    start_migration: String,
    end_migration: String,
    start_rollback: String,
    end_rollback: String,
}

impl Grammar {
    /// Build a grammar from dialect tokens.
    ///
    /// `end_transaction` lists every accepted spelling of the end token.
    pub fn new(
        comment: &str,
        terminator: &str,
        start_transaction: &str,
        end_transaction: &[&str],
    ) -> Self {
        let marker = |phrase: &str| format!("{} {}", comment, phrase);
        Self {
            comment: comment.to_string(),
            terminator: terminator.to_string(),
            start_transaction: start_transaction.trim().to_string(),
            end_transaction: end_transaction
                .iter()
                .map(|t| t.trim().to_string())
                .collect(),
            start_migration: marker(START_MIGRATION_PHRASE),
            end_migration: marker(END_MIGRATION_PHRASE),
            start_rollback: marker(START_ROLLBACK_PHRASE),
            end_rollback: marker(END_ROLLBACK_PHRASE),
        }
    }

    /// Comment token (e.g. `--`)
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Statement terminator (e.g. `;`)
    pub fn terminator(&self) -> &str {
        &self.terminator
    }

    /// Canonical start-transaction token
    pub fn start_transaction(&self) -> &str {
        &self.start_transaction
    }

    /// Canonical end-transaction token (the first accepted spelling)
    pub fn end_transaction(&self) -> &str {
        self.end_transaction
            .first()
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Marker line that opens a section
    pub fn start_marker(&self, section: Section) -> &str {
        match section {
            Section::Migration => &self.start_migration,
            Section::Rollback => &self.start_rollback,
        }
    }

    /// Marker line that closes a section
    pub fn end_marker(&self, section: Section) -> &str {
        match section {
            Section::Migration => &self.end_migration,
            Section::Rollback => &self.end_rollback,
        }
    }

    /// Classify a trimmed line as a marker
    pub fn marker(&self, line: &str) -> Option<Marker> {
        [Section::Migration, Section::Rollback]
            .into_iter()
            .find_map(|section| {
                if line.eq_ignore_ascii_case(self.start_marker(section)) {
                    Some(Marker::Start(section))
                } else if line.eq_ignore_ascii_case(self.end_marker(section)) {
                    Some(Marker::End(section))
                } else {
                    None
                }
            })
    }

    /// Whether a trimmed line is prose to be discarded
    pub fn is_comment(&self, line: &str) -> bool {
        line.starts_with(&self.comment)
    }

    /// Whether a trimmed line contains the statement terminator
    pub fn is_terminated(&self, line: &str) -> bool {
        line.contains(&self.terminator)
    }

    /// Whether a trimmed line is exactly the start-transaction token
    pub fn is_start_transaction(&self, line: &str) -> bool {
        line.eq_ignore_ascii_case(&self.start_transaction)
    }

    /// Whether a trimmed line is one of the end-transaction tokens
    pub fn is_end_transaction(&self, line: &str) -> bool {
        self.end_transaction
            .iter()
            .any(|t| line.eq_ignore_ascii_case(t))
    }

    /// Split a one-line empty transaction (`BEGIN; COMMIT;`) into its
    /// start and end tokens.
    pub fn split_empty_transaction<'l>(&self, line: &'l str) -> Option<(&'l str, &'l str)> {
        let len = self.start_transaction.len();
        let head = line.get(..len)?;
        if !head.eq_ignore_ascii_case(&self.start_transaction) {
            return None;
        }
        let rest = line[len..].trim();
        if self.is_end_transaction(rest) {
            Some((head, rest))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grammar() -> Grammar {
        Grammar::new("--", ";", "BEGIN TRANSACTION;", &["COMMIT;", "END TRANSACTION;"])
    }

    #[test]
    fn test_markers_use_comment_token() {
        let g = grammar();
        assert_eq!(g.start_marker(Section::Migration), "-- start migration");
        assert_eq!(g.end_marker(Section::Rollback), "-- end rollback");
        assert_eq!(
            g.marker("-- START ROLLBACK"),
            Some(Marker::Start(Section::Rollback))
        );
        assert_eq!(g.marker("-- end migration"), Some(Marker::End(Section::Migration)));
        assert_eq!(g.marker("-- start migrations"), None);
    }

    #[test]
    fn test_transaction_tokens_case_insensitive() {
        let g = grammar();
        assert!(g.is_start_transaction("begin transaction;"));
        assert!(g.is_end_transaction("commit;"));
        assert!(g.is_end_transaction("END TRANSACTION;"));
        assert!(!g.is_end_transaction("ROLLBACK;"));
        assert_eq!(g.end_transaction(), "COMMIT;");
    }

    #[test]
    fn test_split_empty_transaction() {
        let g = grammar();
        assert_eq!(
            g.split_empty_transaction("BEGIN TRANSACTION; COMMIT;"),
            Some(("BEGIN TRANSACTION;", "COMMIT;"))
        );
        assert_eq!(g.split_empty_transaction("BEGIN TRANSACTION;"), None);
        assert_eq!(
            g.split_empty_transaction("BEGIN TRANSACTION; SELECT 1;"),
            None
        );
    }
}
