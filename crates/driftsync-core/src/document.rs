//! The two documents stored in a repository's control directory.
//!
//! Only the fields the bootstrap touches are typed strictly. Plugin
//! settings are carried as string maps and interpreted by the plugins.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::key::MasterKey;

/// A plugin reference plus its free-form settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginSettings {
    /// Plugin identifier, e.g. `"local"` or `"fixed"`.
    #[serde(rename = "type")]
    pub kind: String,

    /// Plugin-specific settings.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub settings: BTreeMap<String, String>,
}

impl PluginSettings {
    /// Create settings for the given plugin with no options.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            settings: BTreeMap::new(),
        }
    }

    /// Add a setting.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    /// Look up a setting.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.settings.get(key).map(String::as_str)
    }
}

/// Local, machine-specific settings (`.driftsync/config`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigDocument {
    /// Name identifying this machine in the repository.
    pub machine_name: String,

    /// Human-readable name of the user on this machine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Key for decrypting the repo document, if the repository is encrypted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master_key: Option<MasterKey>,

    /// Storage connection used to reach the repository.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection: Option<PluginSettings>,
}

impl ConfigDocument {
    /// Create a document with only a machine name.
    pub fn new(machine_name: impl Into<String>) -> Self {
        Self {
            machine_name: machine_name.into(),
            display_name: None,
            master_key: None,
            connection: None,
        }
    }

    /// Set the master key.
    pub fn with_master_key(mut self, key: MasterKey) -> Self {
        self.master_key = Some(key);
        self
    }

    /// Set the storage connection.
    pub fn with_connection(mut self, connection: PluginSettings) -> Self {
        self.connection = Some(connection);
        self
    }
}

/// Repository-wide settings (`.driftsync/repo`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoDocument {
    /// Hex repository identifier.
    pub repo_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunker: Option<PluginSettings>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multichunker: Option<PluginSettings>,

    /// Transformers applied to multichunks, outermost last.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transformers: Vec<PluginSettings>,
}

impl RepoDocument {
    /// Create a document with only a repository id.
    pub fn new(repo_id: impl Into<String>) -> Self {
        Self {
            repo_id: repo_id.into(),
            chunker: None,
            multichunker: None,
            transformers: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_document_optional_fields() {
        let doc: ConfigDocument = serde_json::from_str(r#"{"machine_name":"laptop"}"#).unwrap();
        assert_eq!(doc, ConfigDocument::new("laptop"));
        assert!(doc.master_key.is_none());
    }

    #[test]
    fn test_config_document_with_key() {
        let json = format!(
            r#"{{"machine_name":"nas","master_key":{{"salt":"aa","key":"{}"}}}}"#,
            "11".repeat(32)
        );
        let doc: ConfigDocument = serde_json::from_str(&json).unwrap();
        let key = doc.master_key.unwrap();
        assert_eq!(key.salt(), &[0xaa]);
        assert_eq!(key.key_bytes(), &[0x11; 32]);
    }

    #[test]
    fn test_repo_document_plugins() {
        let json = r#"{
            "repo_id": "0a0b",
            "chunker": {"type": "fixed", "settings": {"size": "16"}},
            "transformers": [{"type": "gzip"}, {"type": "cipher"}]
        }"#;
        let doc: RepoDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.chunker.as_ref().and_then(|c| c.get("size")), Some("16"));
        assert_eq!(doc.transformers.len(), 2);
        assert_eq!(doc.transformers[1].kind, "cipher");
        assert!(doc.multichunker.is_none());
    }

    #[test]
    fn test_plugin_settings_type_field() {
        let plugin = PluginSettings::new("local").with("path", "/srv/repo");
        let json = serde_json::to_string(&plugin).unwrap();
        assert_eq!(json, r#"{"type":"local","settings":{"path":"/srv/repo"}}"#);
    }
}
