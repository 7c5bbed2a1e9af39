//! CLI error types and result alias.

use miette::Diagnostic;
use thiserror::Error;

use testkit_env::EnvError;

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// IO error
    #[error("IO error: {0}")]
    #[diagnostic(code(testkit::io))]
    Io(#[from] std::io::Error),

    /// Unreadable input file
    #[error("Input error: {0}")]
    #[diagnostic(code(testkit::input))]
    Input(String),

    /// Environment error
    #[error(transparent)]
    #[diagnostic(transparent)]
    Env(#[from] EnvError),

    /// Validation error
    #[error("Validation error: {0}")]
    #[diagnostic(code(testkit::validation))]
    Validation(String),
}

impl From<dotenvy::Error> for CliError {
    fn from(err: dotenvy::Error) -> Self {
        CliError::Input(format!("Failed to parse env file: {}", err))
    }
}
