//! Upward search for a repository's control directory.

use std::path::{Path, PathBuf};

use driftsync_core::layout;
use tracing::debug;

use crate::error::LocateError;

/// Find the repository root at or above `start`.
///
/// A directory is a repository root if it contains the control directory
/// and the control directory contains a config file. The returned path is
/// canonical. When no ancestor qualifies, this returns the canonical
/// current working directory; use [`find_repository_root`] to tell the two
/// cases apart.
pub fn find_control_directory(start: &Path) -> Result<PathBuf, LocateError> {
    match find_repository_root(start)? {
        Some(root) => Ok(root),
        None => {
            debug!(start = %start.display(), "no control directory found, using working directory");
            canonicalize(Path::new("."))
        }
    }
}

/// Like [`find_control_directory`], but returns `None` when the walk
/// reaches the filesystem root without a match.
pub fn find_repository_root(start: &Path) -> Result<Option<PathBuf>, LocateError> {
    let start = canonicalize(start)?;

    for candidate in start.ancestors() {
        if is_repository_root(candidate) {
            debug!(root = %candidate.display(), "found control directory");
            return Ok(Some(candidate.to_path_buf()));
        }
    }

    Ok(None)
}

fn is_repository_root(dir: &Path) -> bool {
    layout::app_dir(dir).is_dir() && layout::config_file(dir).is_file()
}

fn canonicalize(path: &Path) -> Result<PathBuf, LocateError> {
    path.canonicalize().map_err(|source| LocateError::PathResolution {
        path: path.to_path_buf(),
        source,
    })
}
