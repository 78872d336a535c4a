//! Proptest generators for property-based testing.

use proptest::prelude::*;

use driftsync_core::{ConfigDocument, MasterKey, PluginSettings, RepoDocument};

/// A single directory name that never collides with the control directory.
pub fn path_segment() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,11}"
}

/// Between zero and `max_depth` directory names.
pub fn nested_path(max_depth: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(path_segment(), 0..=max_depth)
}

pub fn machine_name() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9][a-zA-Z0-9 ._-]{0,23}"
}

/// Generate a random repository id (hex).
pub fn repo_id() -> impl Strategy<Value = String> {
    any::<[u8; 16]>().prop_map(hex::encode)
}

/// Generate a master key with a 32-byte salt.
pub fn master_key() -> impl Strategy<Value = MasterKey> {
    (any::<[u8; 32]>(), any::<[u8; 32]>()).prop_map(|(salt, key)| MasterKey::new(salt, key))
}

pub fn plugin_settings() -> impl Strategy<Value = PluginSettings> {
    (
        "[a-z]{1,8}",
        prop::collection::btree_map("[a-z]{1,8}", "[ -~]{0,16}", 0..4),
    )
        .prop_map(|(kind, settings)| {
            settings
                .into_iter()
                .fold(PluginSettings::new(kind), |p, (k, v)| p.with(k, v))
        })
}

/// Config documents with and without a master key.
pub fn config_document() -> impl Strategy<Value = ConfigDocument> {
    (
        machine_name(),
        proptest::option::of("[ -~]{0,16}"),
        proptest::option::of(master_key()),
        proptest::option::of(plugin_settings()),
    )
        .prop_map(|(machine, display, key, connection)| {
            let mut doc = ConfigDocument::new(machine);
            doc.display_name = display;
            doc.master_key = key;
            doc.connection = connection;
            doc
        })
}

pub fn repo_document() -> impl Strategy<Value = RepoDocument> {
    (
        repo_id(),
        proptest::option::of(plugin_settings()),
        proptest::option::of(plugin_settings()),
        prop::collection::vec(plugin_settings(), 0..3),
    )
        .prop_map(|(id, chunker, multichunker, transformers)| {
            let mut doc = RepoDocument::new(id);
            doc.chunker = chunker;
            doc.multichunker = multichunker;
            doc.transformers = transformers;
            doc
        })
}
