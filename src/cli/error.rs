//! CLI-level errors (wraps library errors)

use thiserror::Error;

use crate::config::SettingsError;
use crate::errors::{ExchangeError, NodeTypeError, StoreError};
use crate::services::ServiceError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Exchange(#[from] ExchangeError),

    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    NodeType(#[from] NodeTypeError),

    #[error("{0}")]
    Settings(#[from] SettingsError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl From<ServiceError> for CliError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::Store(error) => CliError::Store(error),
            ServiceError::Exchange(error) => CliError::Exchange(error),
        }
    }
}

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => crate::exitcode::USAGE,
            CliError::Settings(_) => crate::exitcode::CONFIG,
            CliError::NodeType(_) => crate::exitcode::CONFIG,
            CliError::Store(error) => match error {
                StoreError::MenuNotFound(_) => crate::exitcode::NOINPUT,
                StoreError::Io(_) => crate::exitcode::IOERR,
                StoreError::Json(_) => crate::exitcode::DATAERR,
            },
            CliError::Exchange(error) => match error {
                ExchangeError::Io(_) => crate::exitcode::IOERR,
                ExchangeError::EmptyFile(_) => crate::exitcode::DATAERR,
                ExchangeError::MalformedBlob(_) => crate::exitcode::DATAERR,
                ExchangeError::Csv(_) => crate::exitcode::DATAERR,
                ExchangeError::MissingField(_) => crate::exitcode::DATAERR,
                ExchangeError::BlobSerialize(_) => crate::exitcode::SOFTWARE,
            },
        }
    }
}
