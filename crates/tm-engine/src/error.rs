//! Error types for tm-engine

use thiserror::Error;
use tm_core::{CoreError, Version};
use tm_db::DbError;

/// Migration engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Parse, routing, config or file error
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Statement execution or version query error
    #[error(transparent)]
    Db(#[from] DbError),

    /// The version table does not exist yet (M001)
    #[error("[M001] Database is not initialized. Run `tm init` or `tm migrate` first")]
    NotInitialized,

    /// Migration template failed to render (M002)
    #[error("[M002] Failed to render migration template: {0}")]
    Template(String),

    /// A route step has no parsed document (M003)
    #[error("[M003] No parsed migration document for version {0}")]
    MissingDocument(Version),
}

/// Result type alias for EngineError
pub type EngineResult<T> = Result<T, EngineError>;

impl From<minijinja::Error> for EngineError {
    fn from(err: minijinja::Error) -> Self {
        EngineError::Template(err.to_string())
    }
}
