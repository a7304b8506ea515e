//! Error types for nandscope-core
//!
//! This module provides a no_std compatible error type that can be used
//! throughout the crate.

use core::fmt;

/// Core error type - no_std compatible, Copy for efficiency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// ID byte sequence is too short to decode
    InvalidIdentity {
        /// Number of ID bytes that were supplied
        len: usize,
    },
    /// I/O error occurred (reading a dump or a config file)
    IoError,
    /// Configuration could not be parsed
    ConfigError,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIdentity { len } => write!(
                f,
                "ID bytes must be at least {} bytes long, got {}",
                crate::identity::MIN_ID_LEN,
                len
            ),
            Self::IoError => write!(f, "I/O error"),
            Self::ConfigError => write!(f, "invalid analyzer configuration"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type alias using the core Error type
pub type Result<T> = core::result::Result<T, Error>;
