//! Version numbers for migration files and database state

/// Number of a migration file. Version 0 is the bootstrap migration that
/// creates the version-tracking table.
pub type Version = u32;

/// Version reported by a database. May be [`UNINITIALIZED`].
pub type DbVersion = i64;

/// Database version before the bootstrap migration has run
pub const UNINITIALIZED: DbVersion = -1;

/// The reserved bootstrap migration
pub const BOOTSTRAP_VERSION: Version = 0;

/// File extension of migration files
pub const MIGRATION_EXTENSION: &str = "sql";

/// Deterministic file name for a migration version
pub fn file_name(version: Version) -> String {
    format!("{}.{}", version, MIGRATION_EXTENSION)
}

/// Parse a migration file name back into its version.
///
/// Only canonical names are accepted: `7.sql` but not `07.sql` or `7.SQL`,
/// so that every version maps to exactly one file.
pub fn parse_file_name(name: &str) -> Option<Version> {
    let stem = name.strip_suffix(MIGRATION_EXTENSION)?.strip_suffix('.')?;
    if stem.is_empty() || !stem.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if stem.len() > 1 && stem.starts_with('0') {
        return None;
    }
    stem.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_round_trip() {
        assert_eq!(file_name(0), "0.sql");
        assert_eq!(file_name(12), "12.sql");
        assert_eq!(parse_file_name("12.sql"), Some(12));
        assert_eq!(parse_file_name("0.sql"), Some(0));
    }

    #[test]
    fn test_parse_file_name_rejects_non_canonical() {
        assert_eq!(parse_file_name("07.sql"), None);
        assert_eq!(parse_file_name("7.SQL"), None);
        assert_eq!(parse_file_name("seven.sql"), None);
        assert_eq!(parse_file_name(".sql"), None);
        assert_eq!(parse_file_name("7sql"), None);
        assert_eq!(parse_file_name("7.sql.bak"), None);
    }
}
