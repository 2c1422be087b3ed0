//! Error types for the indexing system.
//!
//! All hard failures are represented by the [`Error`] enum. Conditions that are
//! recoverable per document (unreadable files, malformed links, unresolved
//! targets) are accumulated as [`Diagnostic`](crate::Diagnostic)s or link data
//! and never surface here.

use std::io;
use thiserror::Error as ThisError;

/// The core error type for all Vaultgraph operations.
#[derive(ThisError, Debug)]
pub enum Error {
    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A query was issued before any index was built
    #[error("Query issued before the corpus index was built")]
    QueryBeforeBuild,

    /// A rebuild was cancelled before it could be published
    #[error("Index build cancelled")]
    Cancelled,

    /// Invalid file path (outside vault, missing, etc.)
    #[error("Invalid path: {reason}")]
    InvalidPath { reason: String },

    /// Invalid configuration
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },

    /// Generic unclassified error
    #[error("Error: {0}")]
    Other(String),
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an invalid path error
    pub fn invalid_path(reason: impl Into<String>) -> Self {
        Error::InvalidPath {
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(reason: impl Into<String>) -> Self {
        Error::ConfigError {
            reason: reason.into(),
        }
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// True when the error only means "nothing has been built yet"
    pub fn is_unbuilt(&self) -> bool {
        matches!(self, Error::QueryBeforeBuild)
    }
}
