//! Domain-level error types.

use thiserror::Error;

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,
}

impl RepoError {
    /// Whether the error only means the record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepoError::NotFound)
    }
}
