//! # driftsync Config
//!
//! Finds a repository's control directory and loads its documents.
//!
//! ## Overview
//!
//! - [`find_control_directory`] walks upward from a starting path until it
//!   finds a directory holding `.driftsync/config`. If there is none, it
//!   returns the current working directory instead of failing.
//! - [`find_repository_root`] does the same walk but reports "not found"
//!   as `None`.
//! - [`ConfigLoader`] reads `.driftsync/config` and `.driftsync/repo` and
//!   assembles a [`Configuration`](driftsync_core::Configuration).
//!
//! ## Usage
//!
//! ```rust,no_run
//! use driftsync_config::{find_control_directory, ConfigLoader};
//!
//! let root = find_control_directory(std::path::Path::new(".")).unwrap();
//!
//! match ConfigLoader::new().load(&root) {
//!     Ok(Some(config)) => println!("machine {}", config.machine_name()),
//!     Ok(None) => println!("not a repository: {}", root.display()),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```
//!
//! ## Outcomes
//!
//! `load` distinguishes three cases: a full configuration, `None` when
//! there is no control directory at all, and an error when the control
//! directory exists but something in it is missing or unreadable.

pub mod codec;
pub mod error;
pub mod loader;
pub mod locate;

pub use codec::JsonCodec;
pub use error::{ConfigLoadError, LocateError, Result};
pub use loader::{ConfigLoader, RepoSource};
pub use locate::{find_control_directory, find_repository_root};
