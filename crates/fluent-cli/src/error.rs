//! Error types for the fluent CLI.

use fluent_repository::{models::UnknownStatus, RepositoryError};
use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while loading the configuration file.
#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("TOML serialization error: {0}")]
    #[diagnostic(
        code(fluent_cli::toml_serialize),
        help("Check your configuration structure for invalid values")
    )]
    TomlSerError(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    #[diagnostic(
        code(fluent_cli::toml_deserialize),
        help("Check your config.toml syntax and structure")
    )]
    TomlDeError(#[from] toml::de::Error),

    #[error("Invalid default status: {0}")]
    #[diagnostic(
        code(fluent_cli::invalid_default_status),
        help("Set default_status to one of: Draft, Submitted, Shipped, Delivered, Returned, Canceled")
    )]
    InvalidDefaultStatus(String),

    #[error("IO error: {0}")]
    #[diagnostic(code(fluent_cli::config_io))]
    IoError(#[from] std::io::Error),
}

/// Top-level error type of the CLI.
#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Status(#[from] UnknownStatus),

    #[error("Error while {action}")]
    #[diagnostic(
        code(fluent_cli::io),
        help("Check that the file exists and is readable")
    )]
    IoError {
        action: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid seed data in {path}")]
    #[diagnostic(
        code(fluent_cli::seed),
        help("The seed file must be a JSON array of orders")
    )]
    Seed {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("No seed data given")]
    #[diagnostic(
        code(fluent_cli::no_seed),
        help("Pass --seed <FILE> or set seed_path in the config file")
    )]
    MissingSeed,
}

impl From<fluent_db::DbError> for CliError {
    fn from(err: fluent_db::DbError) -> Self {
        CliError::Repository(err.into())
    }
}

pub type Result<T> = std::result::Result<T, CliError>;

/// Adds context to IO errors.
pub trait ErrorContext<T> {
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: FnOnce() -> String;
}

impl<T> ErrorContext<T> for std::io::Result<T> {
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: FnOnce() -> String,
    {
        self.map_err(|err| {
            CliError::IoError {
                action: context(),
                source: err,
            }
        })
    }
}
