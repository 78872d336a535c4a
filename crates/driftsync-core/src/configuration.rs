//! The assembled configuration.

use std::path::{Path, PathBuf};

use crate::document::{ConfigDocument, RepoDocument};
use crate::key::MasterKey;
use crate::layout::{self, DIR_CACHE, DIR_DATABASE, DIR_LOG};

/// Local directory, config document and repo document, loaded together.
///
/// A `Configuration` is only ever produced whole. It cannot be modified
/// after construction; reloading means running the loader again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    local_dir: PathBuf,
    config: ConfigDocument,
    repo: RepoDocument,
}

impl Configuration {
    /// Assemble a configuration from its loaded parts.
    pub fn new(local_dir: impl Into<PathBuf>, config: ConfigDocument, repo: RepoDocument) -> Self {
        Self {
            local_dir: local_dir.into(),
            config,
            repo,
        }
    }

    /// The repository root this configuration was loaded from.
    pub fn local_dir(&self) -> &Path {
        &self.local_dir
    }

    pub fn config(&self) -> &ConfigDocument {
        &self.config
    }

    pub fn repo(&self) -> &RepoDocument {
        &self.repo
    }

    pub fn machine_name(&self) -> &str {
        &self.config.machine_name
    }

    pub fn master_key(&self) -> Option<&MasterKey> {
        self.config.master_key.as_ref()
    }

    /// `<root>/.driftsync`
    pub fn app_dir(&self) -> PathBuf {
        layout::app_dir(&self.local_dir)
    }

    pub fn config_file(&self) -> PathBuf {
        layout::config_file(&self.local_dir)
    }

    pub fn repo_file(&self) -> PathBuf {
        layout::repo_file(&self.local_dir)
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.app_dir().join(DIR_CACHE)
    }

    pub fn database_dir(&self) -> PathBuf {
        self.app_dir().join(DIR_DATABASE)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.app_dir().join(DIR_LOG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_paths() {
        let cfg = Configuration::new(
            "/srv/photos",
            ConfigDocument::new("nas"),
            RepoDocument::new("00"),
        );

        assert_eq!(cfg.local_dir(), Path::new("/srv/photos"));
        assert_eq!(cfg.app_dir(), Path::new("/srv/photos/.driftsync"));
        assert_eq!(cfg.config_file(), Path::new("/srv/photos/.driftsync/config"));
        assert_eq!(cfg.repo_file(), Path::new("/srv/photos/.driftsync/repo"));
        assert_eq!(cfg.cache_dir(), Path::new("/srv/photos/.driftsync/cache"));
        assert_eq!(cfg.database_dir(), Path::new("/srv/photos/.driftsync/db"));
        assert_eq!(cfg.log_dir(), Path::new("/srv/photos/.driftsync/logs"));
        assert_eq!(cfg.machine_name(), "nas");
        assert!(cfg.master_key().is_none());
    }
}
