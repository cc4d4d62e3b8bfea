//! Domain-level error types.

use thiserror::Error;

/// Repository-level errors.
///
/// `NotFound` and `UniqueViolation` are reported distinctly so the HTTP
/// boundary can map them to 404 and 409 without inspecting messages.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Record not found")]
    NotFound,

    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),
}
