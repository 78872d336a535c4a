//! Error types for the logging bootstrap.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while configuring logging.
///
/// None of these escape [`LoggingBootstrap::init`](crate::LoggingBootstrap::init);
/// they are reported on stderr and swallowed there.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Neither a local file nor a bundled configuration is available.
    #[error("could not load logging.properties from the file system or the bundled resources")]
    NoSource,

    /// The local logging configuration could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file handler could not open its log file for appending.
    #[error("cannot open log file {}: {source}", .path.display())]
    OpenHandler {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid log level '{0}'")]
    InvalidLevel(String),

    #[error("unknown handler '{0}'")]
    InvalidHandler(String),

    /// A line that is neither a comment nor `key = value`.
    #[error("malformed line {line}: '{content}'")]
    Malformed { line: usize, content: String },

    /// The process-wide subscriber could not be installed.
    #[error("failed to install subscriber: {0}")]
    Install(String),
}

/// Result type for logging operations.
pub type Result<T> = std::result::Result<T, LoggingError>;
