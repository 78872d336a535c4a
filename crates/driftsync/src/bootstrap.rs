//! The startup sequence.

use std::path::Path;

use driftsync_config::{find_repository_root, ConfigLoader};
use driftsync_core::{Configuration, DocumentCodec, RepoCipher};
use tracing::info;

use crate::error::Result;

/// Initialise logging, find the repository root at or above `start` and
/// load its configuration with the default codec and cipher.
///
/// `Ok(None)` means neither `start` nor any of its ancestors is a
/// repository root. The working directory is never consulted.
pub fn bootstrap(start: &Path) -> Result<Option<Configuration>> {
    bootstrap_with(start, &ConfigLoader::new())
}

/// [`bootstrap`] with a caller-supplied loader.
pub fn bootstrap_with<C, K>(start: &Path, loader: &ConfigLoader<C, K>) -> Result<Option<Configuration>>
where
    C: DocumentCodec,
    K: RepoCipher,
{
    driftsync_logging::init();

    let Some(root) = find_repository_root(start)? else {
        info!(start = %start.display(), "no repository root found");
        return Ok(None);
    };
    info!(root = %root.display(), "using repository root");

    Ok(loader.load(&root)?)
}
