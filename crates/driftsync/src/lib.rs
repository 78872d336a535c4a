//! # driftsync
//!
//! Startup for a driftsync instance: logging, control-directory discovery
//! and configuration loading.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! match driftsync::bootstrap(Path::new(".")) {
//!     Ok(Some(config)) => println!("repo {}", config.repo().repo_id),
//!     Ok(None) => println!("no repository here, try 'init' or 'connect'"),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `driftsync::core` - Documents, keys, layout and capability traits
//! - `driftsync::cipher` - Repo document encryption
//! - `driftsync::config` - Locator and loader
//! - `driftsync::logging` - Logging bootstrap and facilities

pub mod bootstrap;
pub mod error;

pub use driftsync_cipher as cipher;
pub use driftsync_config as config;
pub use driftsync_core as core;
pub use driftsync_logging as logging;

pub use bootstrap::{bootstrap, bootstrap_with};
pub use error::{Error, Result};

pub use driftsync_config::{find_control_directory, find_repository_root, ConfigLoader};
pub use driftsync_core::{ConfigDocument, Configuration, MasterKey, RepoDocument};
