//! Repository layouts on disk.

use std::fs;
use std::path::{Path, PathBuf};

use driftsync_core::{layout, ConfigDocument, MasterKey, PluginSettings, RepoDocument};
use serde::Serialize;
use tempfile::TempDir;

/// A temporary directory acting as a repository root.
///
/// Nothing exists inside it until one of the `write_*` or `create_*`
/// methods is called. The directory is removed on drop.
pub struct RepoFixture {
    _dir: TempDir,
    root: PathBuf,
}

impl RepoFixture {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        // Canonical so paths compare equal to what the locator returns.
        let root = dir.path().canonicalize().expect("canonicalize temp dir");
        Self { _dir: dir, root }
    }

    /// The repository root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn app_dir(&self) -> PathBuf {
        layout::app_dir(&self.root)
    }

    pub fn config_file(&self) -> PathBuf {
        layout::config_file(&self.root)
    }

    pub fn repo_file(&self) -> PathBuf {
        layout::repo_file(&self.root)
    }

    /// Create `.driftsync/` with nothing in it.
    pub fn create_app_dir(&self) {
        fs::create_dir_all(self.app_dir()).expect("create app dir");
    }

    /// Create and return `root/<segments...>`.
    pub fn nested<S: AsRef<str>>(&self, segments: &[S]) -> PathBuf {
        let path = segments
            .iter()
            .fold(self.root.clone(), |path, s| path.join(s.as_ref()));
        fs::create_dir_all(&path).expect("create nested dir");
        path
    }

    /// Write the config document as JSON.
    pub fn write_config(&self, doc: &ConfigDocument) {
        self.write_config_bytes(&to_json(doc));
    }

    pub fn write_config_bytes(&self, bytes: &[u8]) {
        self.create_app_dir();
        fs::write(self.config_file(), bytes).expect("write config file");
    }

    /// Write the repo document as plaintext JSON.
    pub fn write_plain_repo(&self, doc: &RepoDocument) {
        self.write_repo_bytes(&to_json(doc));
    }

    /// Write the repo document encrypted under `key`.
    pub fn write_encrypted_repo(&self, doc: &RepoDocument, key: &MasterKey) {
        let sealed = driftsync_cipher::encrypt(&to_json(doc), key).expect("encrypt repo document");
        self.write_repo_bytes(&sealed);
    }

    pub fn write_repo_bytes(&self, bytes: &[u8]) {
        self.create_app_dir();
        fs::write(self.repo_file(), bytes).expect("write repo file");
    }
}

impl Default for RepoFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A config document with every optional field filled in.
pub fn sample_config(machine_name: &str, key: Option<MasterKey>) -> ConfigDocument {
    let mut doc = ConfigDocument::new(machine_name).with_connection(
        PluginSettings::new("local").with("path", "/srv/driftsync"),
    );
    doc.display_name = Some(format!("{machine_name} user"));
    doc.master_key = key;
    doc
}

/// A repo document with a chunker, multichunker and two transformers.
pub fn sample_repo(repo_id: &str) -> RepoDocument {
    let mut doc = RepoDocument::new(repo_id);
    doc.chunker = Some(PluginSettings::new("fixed").with("size", "16"));
    doc.multichunker = Some(PluginSettings::new("zip").with("size", "4096"));
    doc.transformers = vec![
        PluginSettings::new("gzip"),
        PluginSettings::new("cipher").with("ciphers", "aes-gcm-128"),
    ];
    doc
}

fn to_json<T: Serialize>(value: &T) -> Vec<u8> {
    serde_json::to_vec_pretty(value).expect("serialize document")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_starts_empty() {
        let fixture = RepoFixture::new();
        assert!(!fixture.app_dir().exists());
    }

    #[test]
    fn test_write_config_creates_app_dir() {
        let fixture = RepoFixture::new();
        fixture.write_config(&ConfigDocument::new("laptop"));

        assert!(fixture.app_dir().is_dir());
        let text = fs::read_to_string(fixture.config_file()).unwrap();
        assert!(text.contains("laptop"));
    }

    #[test]
    fn test_encrypted_repo_is_detected() {
        let fixture = RepoFixture::new();
        let key = MasterKey::generate();
        fixture.write_encrypted_repo(&sample_repo("beef"), &key);

        let bytes = fs::read(fixture.repo_file()).unwrap();
        assert!(driftsync_cipher::is_encrypted(&mut bytes.as_slice()).unwrap());
    }

    #[test]
    fn test_nested_under_root() {
        let fixture = RepoFixture::new();
        let path = fixture.nested(&["a", "b", "c"]);
        assert!(path.is_dir());
        assert_eq!(path, fixture.root().join("a/b/c"));
    }
}
