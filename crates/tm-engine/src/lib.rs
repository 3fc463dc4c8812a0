//! tm-engine - Migration engine for Tidemark
//!
//! Loads and parses migration files, plans routes with the version router
//! and applies them through a [`tm_db::Database`].

pub mod engine;
pub mod error;
pub mod executor;
pub mod migrations;
pub mod scaffold;
pub mod sql_check;

#[cfg(test)]
pub(crate) mod test_utils;

pub use engine::{Engine, Status};
pub use error::{EngineError, EngineResult};
pub use executor::{Executor, Outcome, StatementCallback};
pub use migrations::{MigrationSet, ValidationReport};
pub use scaffold::render_migration;
pub use sql_check::{check_document, SqlIssue};
