//! Loading the config and repo documents from a control directory.

use std::fs::File;
use std::io::Seek;
use std::path::Path;

use driftsync_cipher::EnvelopeCipher;
use driftsync_core::{
    layout, ConfigDocument, Configuration, DocumentCodec, DocumentInput, RepoCipher, RepoDocument,
};
use serde::de::DeserializeOwned;
use tracing::info;

use crate::codec::JsonCodec;
use crate::error::{ConfigLoadError, Result};

/// How the repo file has to be read, decided by the encryption probe.
///
/// The file handle is positioned at the start in both cases.
#[derive(Debug)]
pub enum RepoSource {
    /// Hand the file to the codec as-is.
    Plaintext(File),
    /// Decrypt with the master key first.
    Encrypted(File),
}

/// Loads a [`Configuration`] from a repository root.
///
/// Generic over the document codec and the repo cipher so either can be
/// replaced; the defaults are [`JsonCodec`] and [`EnvelopeCipher`].
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader<C = JsonCodec, K = EnvelopeCipher> {
    codec: C,
    cipher: K,
}

impl ConfigLoader {
    /// Create a loader with the default codec and cipher.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: DocumentCodec, K: RepoCipher> ConfigLoader<C, K> {
    /// Create a loader with a specific codec and cipher.
    pub fn with_parts(codec: C, cipher: K) -> Self {
        Self { codec, cipher }
    }

    pub fn cipher(&self) -> &K {
        &self.cipher
    }

    /// Load the configuration of the repository rooted at `root`.
    ///
    /// Returns `Ok(None)` if nothing named like the control directory exists
    /// under `root`. Once it exists, even as a plain file, a missing or
    /// unreadable document is an error.
    pub fn load(&self, root: &Path) -> Result<Option<Configuration>> {
        let app_dir = layout::app_dir(root);

        if !app_dir.exists() {
            info!(app_dir = %app_dir.display(), "not loading config, app dir does not exist");
            return Ok(None);
        }

        info!(root = %root.display(), "loading config");

        let config = self.load_config_document(root)?;
        let repo = self.load_repo_document(root, &config)?;

        Ok(Some(Configuration::new(root, config, repo)))
    }

    /// Load `.driftsync/config`.
    pub fn load_config_document(&self, root: &Path) -> Result<ConfigDocument> {
        let path = layout::config_file(root);

        if !path.is_file() {
            return Err(ConfigLoadError::ConfigFileMissing(path));
        }

        let mut file = File::open(&path).map_err(ConfigLoadError::io(&path))?;
        self.decode(&path, DocumentInput::Stream(&mut file))
    }

    /// Load `.driftsync/repo`, decrypting it with the master key from
    /// `config` if the probe says it is encrypted.
    pub fn load_repo_document(&self, root: &Path, config: &ConfigDocument) -> Result<RepoDocument> {
        let path = layout::repo_file(root);

        if !path.is_file() {
            return Err(ConfigLoadError::RepoFileMissing(path));
        }

        let mut file;
        let text;

        let input = match self.probe(&path)? {
            RepoSource::Plaintext(f) => {
                info!(path = %path.display(), "loading (unencrypted) repo file");
                file = f;
                DocumentInput::Stream(&mut file)
            }
            RepoSource::Encrypted(mut f) => {
                info!(path = %path.display(), "loading encrypted repo file");
                let key = config
                    .master_key
                    .as_ref()
                    .ok_or_else(|| ConfigLoadError::MissingMasterKey(path.clone()))?;

                let plaintext = self
                    .cipher
                    .decrypt(&mut f, key)
                    .map_err(|source| ConfigLoadError::Decrypt {
                        path: path.clone(),
                        source,
                    })?;

                text = String::from_utf8(plaintext).map_err(|source| ConfigLoadError::InvalidUtf8 {
                    path: path.clone(),
                    source,
                })?;
                DocumentInput::Text(&text)
            }
        };

        self.decode(&path, input)
    }

    /// Open the repo file and classify it.
    pub fn probe(&self, path: &Path) -> Result<RepoSource> {
        let mut file = File::open(path).map_err(ConfigLoadError::io(path))?;

        let encrypted = self
            .cipher
            .is_encrypted(&mut file)
            .map_err(ConfigLoadError::io(path))?;
        file.rewind().map_err(ConfigLoadError::io(path))?;

        Ok(if encrypted {
            RepoSource::Encrypted(file)
        } else {
            RepoSource::Plaintext(file)
        })
    }

    fn decode<T: DeserializeOwned>(&self, path: &Path, input: DocumentInput<'_>) -> Result<T> {
        self.codec
            .decode(input)
            .map_err(|source| ConfigLoadError::Decode {
                path: path.to_path_buf(),
                source,
            })
    }
}

impl RepoSource {
    pub fn is_encrypted(&self) -> bool {
        matches!(self, Self::Encrypted(_))
    }

    /// The underlying file, for callers that want to read it themselves.
    pub fn into_file(self) -> File {
        match self {
            Self::Plaintext(file) | Self::Encrypted(file) => file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use driftsync_core::{BoxError, MasterKey, DIR_APPLICATION, FILE_CONFIG, FILE_REPO};
    use std::cell::Cell;
    use std::fs;
    use std::io::Read;
    use tempfile::TempDir;

    /// Envelope cipher that counts how often it is asked to decrypt.
    #[derive(Default)]
    struct CountingCipher {
        probes: Cell<usize>,
        decrypts: Cell<usize>,
    }

    impl RepoCipher for CountingCipher {
        fn is_encrypted(&self, reader: &mut dyn Read) -> std::io::Result<bool> {
            self.probes.set(self.probes.get() + 1);
            EnvelopeCipher.is_encrypted(reader)
        }

        fn decrypt(&self, reader: &mut dyn Read, key: &MasterKey) -> std::result::Result<Vec<u8>, BoxError> {
            self.decrypts.set(self.decrypts.get() + 1);
            EnvelopeCipher.decrypt(reader, key)
        }
    }

    const REPO_JSON: &str = r#"{"repo_id":"c0ffee","chunker":{"type":"fixed","settings":{"size":"16"}}}"#;

    fn app_dir(tmp: &TempDir) -> std::path::PathBuf {
        let dir = tmp.path().join(DIR_APPLICATION);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_config(tmp: &TempDir, config: &ConfigDocument) {
        let json = serde_json::to_string(config).unwrap();
        fs::write(app_dir(tmp).join(FILE_CONFIG), json).unwrap();
    }

    fn write_repo(tmp: &TempDir, bytes: &[u8]) {
        fs::write(app_dir(tmp).join(FILE_REPO), bytes).unwrap();
    }

    fn counting_loader() -> ConfigLoader<JsonCodec, CountingCipher> {
        ConfigLoader::with_parts(JsonCodec, CountingCipher::default())
    }

    #[test]
    fn test_no_app_dir_is_not_an_error() {
        let tmp = TempDir::new().unwrap();
        assert!(ConfigLoader::new().load(tmp.path()).unwrap().is_none());
    }

    #[test]
    fn test_config_file_missing() {
        let tmp = TempDir::new().unwrap();
        app_dir(&tmp);

        let err = ConfigLoader::new().load(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigLoadError::ConfigFileMissing(_)));
        let msg = err.to_string();
        assert!(msg.contains("config file missing"));
        assert!(msg.contains("'connect'"));
        assert!(msg.contains("'init'"));
    }

    #[test]
    fn test_app_dir_as_file_is_config_missing() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(DIR_APPLICATION), b"not a directory").unwrap();

        let err = ConfigLoader::new().load(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigLoadError::ConfigFileMissing(_)));
    }

    #[test]
    fn test_repo_file_missing() {
        let tmp = TempDir::new().unwrap();
        write_config(&tmp, &ConfigDocument::new("laptop"));

        let err = ConfigLoader::new().load(tmp.path()).unwrap_err();
        match &err {
            ConfigLoadError::RepoFileMissing(path) => assert!(path.ends_with("repo")),
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("repo file"));
    }

    #[test]
    fn test_plaintext_repo_never_decrypts() {
        let tmp = TempDir::new().unwrap();
        write_config(&tmp, &ConfigDocument::new("laptop").with_master_key(MasterKey::generate()));
        write_repo(&tmp, REPO_JSON.as_bytes());

        let loader = counting_loader();
        let config = loader.load(tmp.path()).unwrap().unwrap();

        let direct: RepoDocument = serde_json::from_str(REPO_JSON).unwrap();
        assert_eq!(config.repo(), &direct);
        assert_eq!(config.local_dir(), tmp.path());
        assert_eq!(loader.cipher().probes.get(), 1);
        assert_eq!(loader.cipher().decrypts.get(), 0);
    }

    #[test]
    fn test_encrypted_repo_with_key() {
        let tmp = TempDir::new().unwrap();
        let key = MasterKey::generate();
        write_config(&tmp, &ConfigDocument::new("nas").with_master_key(key.clone()));
        write_repo(&tmp, &driftsync_cipher::encrypt(REPO_JSON.as_bytes(), &key).unwrap());

        let loader = counting_loader();
        let config = loader.load(tmp.path()).unwrap().unwrap();

        let direct: RepoDocument = serde_json::from_str(REPO_JSON).unwrap();
        assert_eq!(config.repo(), &direct);
        assert_eq!(config.master_key(), Some(&key));
        assert_eq!(loader.cipher().decrypts.get(), 1);
    }

    #[test]
    fn test_encrypted_repo_without_key() {
        let tmp = TempDir::new().unwrap();
        write_config(&tmp, &ConfigDocument::new("nas"));
        write_repo(
            &tmp,
            &driftsync_cipher::encrypt(REPO_JSON.as_bytes(), &MasterKey::generate()).unwrap(),
        );

        let loader = counting_loader();
        let err = loader.load(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigLoadError::MissingMasterKey(_)));
        assert!(err.to_string().contains("encrypted but no master key configured"));
        assert_eq!(loader.cipher().decrypts.get(), 0);
    }

    #[test]
    fn test_encrypted_repo_wrong_key() {
        let tmp = TempDir::new().unwrap();
        write_config(&tmp, &ConfigDocument::new("nas").with_master_key(MasterKey::generate()));
        write_repo(
            &tmp,
            &driftsync_cipher::encrypt(REPO_JSON.as_bytes(), &MasterKey::generate()).unwrap(),
        );

        let err = ConfigLoader::new().load(tmp.path()).unwrap_err();
        let ConfigLoadError::Decrypt { source, .. } = &err else {
            panic!("unexpected error: {err}");
        };
        assert!(source.downcast_ref::<driftsync_cipher::CipherError>().is_some());
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_encrypted_non_utf8_plaintext() {
        let tmp = TempDir::new().unwrap();
        let key = MasterKey::generate();
        write_config(&tmp, &ConfigDocument::new("nas").with_master_key(key.clone()));
        write_repo(&tmp, &driftsync_cipher::encrypt(&[0xff, 0xfe, 0x00], &key).unwrap());

        let err = ConfigLoader::new().load(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigLoadError::InvalidUtf8 { .. }));
    }

    #[test]
    fn test_malformed_config_keeps_cause() {
        let tmp = TempDir::new().unwrap();
        fs::write(app_dir(&tmp).join(FILE_CONFIG), "{ machine_name: ").unwrap();

        let err = ConfigLoader::new().load(tmp.path()).unwrap_err();
        let ConfigLoadError::Decode { path, source } = &err else {
            panic!("unexpected error: {err}");
        };
        assert!(path.ends_with("config"));
        assert!(source.downcast_ref::<serde_json::Error>().is_some());
    }

    #[test]
    fn test_malformed_decrypted_repo() {
        let tmp = TempDir::new().unwrap();
        let key = MasterKey::generate();
        write_config(&tmp, &ConfigDocument::new("nas").with_master_key(key.clone()));
        write_repo(&tmp, &driftsync_cipher::encrypt(b"not json", &key).unwrap());

        let err = ConfigLoader::new().load(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Decode { .. }));
    }

    #[test]
    fn test_probe_rewinds() {
        let tmp = TempDir::new().unwrap();
        write_repo(&tmp, REPO_JSON.as_bytes());

        let source = ConfigLoader::new()
            .probe(&tmp.path().join(DIR_APPLICATION).join(FILE_REPO))
            .unwrap();
        assert!(!source.is_encrypted());

        let mut contents = String::new();
        source.into_file().read_to_string(&mut contents).unwrap();
        assert_eq!(contents, REPO_JSON);
    }

    #[test]
    fn test_single_steps() {
        let tmp = TempDir::new().unwrap();
        write_config(&tmp, &ConfigDocument::new("desk"));
        write_repo(&tmp, REPO_JSON.as_bytes());

        let loader = ConfigLoader::new();
        let config = loader.load_config_document(tmp.path()).unwrap();
        assert_eq!(config.machine_name, "desk");

        let repo = loader.load_repo_document(tmp.path(), &config).unwrap();
        assert_eq!(repo.repo_id, "c0ffee");
    }
}
