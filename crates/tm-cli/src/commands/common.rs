//! Shared utilities for CLI commands

use std::fmt;
use tm_core::{DbVersion, UNINITIALIZED};
use tm_engine::{EngineError, Outcome};

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that destructors run before the process ends.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Control flow only, never shown to the user.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Human-readable database version
pub(crate) fn describe_version(version: DbVersion) -> String {
    if version == UNINITIALIZED {
        "uninitialized".to_string()
    } else {
        version.to_string()
    }
}

/// Print the outcome of a migrate, rollback or update
pub(crate) fn report_outcome(outcome: &Outcome, dry_run: bool) {
    if dry_run {
        println!("Dry run complete. {}", outcome);
    } else {
        println!("{}", outcome);
    }
}

/// Follow-up advice for errors raised while planning a route
pub(crate) fn routing_hint(err: &anyhow::Error) -> Option<&'static str> {
    match err.downcast_ref::<EngineError>() {
        Some(EngineError::Core(e)) if e.is_routing() => {
            Some("Run `tm status` to see the current version and the available migrations.")
        }
        _ => None,
    }
}

pub(crate) fn calculate_column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.len());
        }
    }
    widths
}

/// Print a left-aligned table with a dashed separator under the header.
pub(crate) fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let widths = calculate_column_widths(headers, rows);

    let header_parts: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, &w)| format!("{:<width$}", h, width = w))
        .collect();
    println!("{}", header_parts.join("  ").trim_end());

    let sep_parts: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    println!("{}", sep_parts.join("  "));

    for row in rows {
        let row_parts: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{:<width$}", cell, width = w))
            .collect();
        println!("{}", row_parts.join("  ").trim_end());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tm_core::CoreError;

    #[test]
    fn test_routing_hint_only_for_routing_errors() {
        let routing: anyhow::Error =
            EngineError::Core(CoreError::MissingMigrationFile { version: 2 }).into();
        assert!(routing_hint(&routing).unwrap().contains("tm status"));

        let other: anyhow::Error = EngineError::NotInitialized.into();
        assert!(routing_hint(&other).is_none());
        assert!(routing_hint(&anyhow::anyhow!("boom")).is_none());
    }

    #[test]
    fn test_column_widths_fit_longest_cell() {
        let widths = calculate_column_widths(
            &["VERSION", "APPLIED AT"],
            &[
                vec!["0".into(), "2024-05-01 09:30:00".into()],
                vec!["12345678".into(), "".into()],
            ],
        );
        assert_eq!(widths, vec![8, 19]);
    }

    #[test]
    fn test_describe_version() {
        assert_eq!(describe_version(UNINITIALIZED), "uninitialized");
        assert_eq!(describe_version(4), "4");
    }
}
