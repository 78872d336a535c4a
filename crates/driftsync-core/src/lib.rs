//! # driftsync Core
//!
//! Pure data model for the driftsync configuration bootstrap.
//!
//! This crate contains no I/O. It defines the documents that live in a
//! repository's control directory, the key material used to decrypt them,
//! and the capability traits the loader consumes.
//!
//! ## Key Types
//!
//! - [`MasterKey`] - Salted secret key used to decrypt the repo document
//! - [`ConfigDocument`] - Local, machine-specific settings
//! - [`RepoDocument`] - Repository-wide settings
//! - [`Configuration`] - The immutable composite handed to the application
//!
//! ## Capabilities
//!
//! - [`DocumentCodec`] - Turns bytes or text into a typed document
//! - [`RepoCipher`] - Detects and decrypts an encrypted repo document
//!
//! ## Layout
//!
//! ```text
//! <root>/
//!   .driftsync/
//!     config      local config document
//!     repo        repo document (plaintext or encrypted)
//!     cache/
//!     db/
//!     logs/
//! ```

pub mod capability;
pub mod configuration;
pub mod document;
pub mod key;
pub mod layout;

mod hex_serde;

pub use capability::{BoxError, DocumentCodec, DocumentInput, RepoCipher};
pub use configuration::Configuration;
pub use document::{ConfigDocument, PluginSettings, RepoDocument};
pub use key::MasterKey;
pub use layout::{DIR_APPLICATION, DIR_CACHE, DIR_DATABASE, DIR_LOG, FILE_CONFIG, FILE_REPO};
