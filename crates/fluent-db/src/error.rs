//! Error types for fluent-db.

use miette::Diagnostic;
use thiserror::Error;

/// Error type for query composition and in-memory materialization.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum DbError {
    #[error("Invalid include chain: cannot continue with '{navigation}', {reason}")]
    #[diagnostic(
        code(fluent_db::invalid_include_chain),
        help("Start a new load path with an attach before continuing it")
    )]
    InvalidIncludeChain {
        navigation: &'static str,
        reason: &'static str,
    },

    #[error("Type mismatch: navigation '{navigation}' is declared on {found}, expected {expected}")]
    #[diagnostic(
        code(fluent_db::type_mismatch),
        help("The navigation must start from the entity the load path currently points at")
    )]
    TypeMismatch {
        navigation: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("No rows registered for entity {0}")]
    #[diagnostic(
        code(fluent_db::unknown_entity),
        help("Insert rows for this entity into the engine before fetching")
    )]
    UnknownEntity(&'static str),

    #[error("Row store lock poisoned")]
    #[diagnostic(
        code(fluent_db::poison),
        help("This is an internal error, please report it")
    )]
    Poisoned,
}

/// Result type alias for fluent-db operations.
pub type Result<T> = std::result::Result<T, DbError>;
