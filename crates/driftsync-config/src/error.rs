//! Error types for locating and loading configuration.

use std::path::PathBuf;
use std::string::FromUtf8Error;

use driftsync_core::BoxError;
use thiserror::Error;

/// The starting path could not be resolved.
#[derive(Debug, Error)]
pub enum LocateError {
    #[error("cannot resolve path {}: {source}", .path.display())]
    PathResolution {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur while loading a repository's configuration.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error(
        "config file missing: cannot find {}. Try connecting to a repository using 'connect', or 'init' to create a new one.",
        .0.display()
    )]
    ConfigFileMissing(PathBuf),

    #[error(
        "repo file missing: cannot find {}. Try connecting to a repository using 'connect', or 'init' to create a new one.",
        .0.display()
    )]
    RepoFileMissing(PathBuf),

    #[error("repo file is encrypted but no master key configured (repo file {})", .0.display())]
    MissingMasterKey(PathBuf),

    #[error("cannot decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    #[error("cannot decrypt repo file {}: {source}", .path.display())]
    Decrypt {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    #[error("decrypted repo file {} is not valid UTF-8", .path.display())]
    InvalidUtf8 {
        path: PathBuf,
        #[source]
        source: FromUtf8Error,
    },

    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigLoadError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}

/// Result type for loading operations.
pub type Result<T> = std::result::Result<T, ConfigLoadError>;
