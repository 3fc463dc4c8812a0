//! tm-db - Database abstraction layer for Tidemark
//!
//! This crate provides the `Database` and `Dialect` traits consumed by the
//! migration engine, and their DuckDB implementations.

pub mod dialect;
pub mod duckdb;
pub mod error;
pub mod traits;

pub use dialect::{Dialect, DuckDbDialect};
pub use crate::duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use traits::{Database, VersionRecord};
