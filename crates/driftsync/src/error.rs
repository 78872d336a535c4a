//! Error types for startup.

use driftsync_config::{ConfigLoadError, LocateError};
use thiserror::Error;

/// Errors that can occur while bootstrapping an instance.
#[derive(Debug, Error)]
pub enum Error {
    /// The starting directory could not be resolved.
    #[error(transparent)]
    Locate(#[from] LocateError),

    /// The control directory exists but its documents could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigLoadError),
}

/// Result type for startup.
pub type Result<T> = std::result::Result<T, Error>;
