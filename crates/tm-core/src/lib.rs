//! tm-core - Core library for Tidemark
//!
//! This crate provides the migration document model, the migration file
//! parser, the version router, migration file storage, and configuration
//! parsing shared by the other Tidemark crates.

pub mod config;
pub mod document;
pub mod error;
pub mod files;
pub mod grammar;
pub mod parser;
pub mod router;
pub mod version;

pub use config::{Config, DatabaseConfig, DbType, Dialect};
pub use document::{MigrationDocument, Section, StatementUnit};
pub use error::{CoreError, CoreResult};
pub use files::{FsMigrationFiles, MigrationFiles};
pub use grammar::{Grammar, Marker};
pub use parser::{parse, Parser};
pub use router::{plan, Direction, Request, Route};
pub use version::{DbVersion, Version, BOOTSTRAP_VERSION, UNINITIALIZED};
