//! Startup must only look at the start path, never at the working
//! directory. Changing the working directory is process-wide, so this
//! lives in its own test binary with a single test.

use driftsync::bootstrap;
use driftsync_core::ConfigDocument;
use driftsync_testkit::{sample_config, sample_repo, RepoFixture};
use tempfile::TempDir;

#[test]
fn test_working_directory_repository_is_ignored() {
    let unrelated = TempDir::new().unwrap();
    let original = std::env::current_dir().unwrap();

    let repo = RepoFixture::new();
    repo.write_config(&sample_config("laptop", None));
    repo.write_plain_repo(&sample_repo("0a1b"));
    std::env::set_current_dir(repo.root()).unwrap();
    let from_full_repo = bootstrap(unrelated.path());

    let half_repo = RepoFixture::new();
    half_repo.create_app_dir();
    std::env::set_current_dir(half_repo.root()).unwrap();
    let from_half_repo = bootstrap(unrelated.path());

    let config_only = RepoFixture::new();
    config_only.write_config(&ConfigDocument::new("nas"));
    std::env::set_current_dir(config_only.root()).unwrap();
    let from_config_only = bootstrap(unrelated.path());

    std::env::set_current_dir(original).unwrap();

    assert!(from_full_repo.unwrap().is_none());
    assert!(from_half_repo.unwrap().is_none());
    assert!(from_config_only.unwrap().is_none());
}
