//! # driftsync Testkit
//!
//! Testing utilities for driftsync.
//!
//! ## Fixtures
//!
//! [`RepoFixture`] lays out a repository in a temporary directory:
//!
//! ```rust
//! use driftsync_core::{ConfigDocument, RepoDocument};
//! use driftsync_testkit::RepoFixture;
//!
//! let fixture = RepoFixture::new();
//! fixture.write_config(&ConfigDocument::new("laptop"));
//! fixture.write_plain_repo(&RepoDocument::new("0a0b"));
//!
//! let start = fixture.nested(&["src", "deep"]);
//! assert!(start.starts_with(fixture.root()));
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use driftsync_testkit::generators::nested_path;
//!
//! proptest! {
//!     #[test]
//!     fn found_from_any_depth(segments in nested_path(6)) {
//!         // ...
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{sample_config, sample_repo, RepoFixture};
pub use generators::{config_document, master_key, nested_path, path_segment, repo_document};
