//! Error types for command dispatch

use thiserror::Error;

/// Errors produced while parsing or executing a command line
///
/// Every variant is turned into an error response by the dispatcher; none
/// of them reach the transport as a failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Recognized command with the wrong number of parameters
    #[error("Invalid format: {command} expects {expected} parameters, got {found}")]
    InvalidFormat {
        command: String,
        expected: usize,
        found: usize,
    },

    /// Command name is not supported
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Parameter is not a one-byte hex value
    #[error("Invalid hex parameter: {0}")]
    InvalidHex(String),

    /// Parameter is not a decimal integer
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Command needs dump data but none is loaded
    #[error("No data loaded")]
    NoDataLoaded,

    /// ID bytes could not be decoded
    ///
    /// Parsed requests always carry enough ID bytes, so dispatch only sees
    /// this through `From<nandscope_core::Error>` when a core decode fails.
    #[error("Invalid identity: {0}")]
    InvalidIdentity(nandscope_core::Error),
}

/// Machine-readable error kind carried in error responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum ErrorKind {
    /// See [`CommandError::InvalidFormat`]
    InvalidFormat,
    /// See [`CommandError::UnknownCommand`]
    UnknownCommand,
    /// See [`CommandError::InvalidHex`]
    InvalidHex,
    /// See [`CommandError::InvalidParameter`]
    InvalidParameter,
    /// See [`CommandError::NoDataLoaded`]
    NoDataLoaded,
    /// See [`CommandError::InvalidIdentity`]
    InvalidIdentity,
}

impl CommandError {
    /// Machine-readable kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidFormat { .. } => ErrorKind::InvalidFormat,
            Self::UnknownCommand(_) => ErrorKind::UnknownCommand,
            Self::InvalidHex(_) => ErrorKind::InvalidHex,
            Self::InvalidParameter(_) => ErrorKind::InvalidParameter,
            Self::NoDataLoaded => ErrorKind::NoDataLoaded,
            Self::InvalidIdentity(_) => ErrorKind::InvalidIdentity,
        }
    }
}

impl From<nandscope_core::Error> for CommandError {
    fn from(e: nandscope_core::Error) -> Self {
        CommandError::InvalidIdentity(e)
    }
}

/// Result type for command handling
pub type Result<T> = core::result::Result<T, CommandError>;
