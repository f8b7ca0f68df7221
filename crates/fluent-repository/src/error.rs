//! Error types for fluent-repository.

use fluent_db::DbError;
use miette::Diagnostic;
use thiserror::Error;

/// Error type for builder misuse and rejected load paths.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Contract violation: {0}")]
    #[diagnostic(
        code(fluent_repository::contract_violation),
        help("Include builders are only valid until the root builder yields its query")
    )]
    ContractViolation(&'static str),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Db(#[from] DbError),
}

/// Result type alias for fluent-repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
