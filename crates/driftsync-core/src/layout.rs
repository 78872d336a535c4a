//! Names of the files and directories that make up a repository's control
//! directory.

use std::path::{Path, PathBuf};

/// The control directory, directly under the repository root.
pub const DIR_APPLICATION: &str = ".driftsync";

/// Local config document, inside the control directory.
pub const FILE_CONFIG: &str = "config";

/// Repo document, inside the control directory.
pub const FILE_REPO: &str = "repo";

/// Chunk cache, inside the control directory.
pub const DIR_CACHE: &str = "cache";

/// Local database, inside the control directory.
pub const DIR_DATABASE: &str = "db";

/// Log files, inside the control directory.
pub const DIR_LOG: &str = "logs";

/// `<root>/.driftsync`
pub fn app_dir(root: &Path) -> PathBuf {
    root.join(DIR_APPLICATION)
}

/// `<root>/.driftsync/config`
pub fn config_file(root: &Path) -> PathBuf {
    app_dir(root).join(FILE_CONFIG)
}

/// `<root>/.driftsync/repo`
pub fn repo_file(root: &Path) -> PathBuf {
    app_dir(root).join(FILE_REPO)
}
