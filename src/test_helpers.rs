//! Common test helper functions shared across test modules.
//!
//! This module provides reusable fixtures for tags, change entries and mock
//! forges so individual test suites stay focused on behavior.
use chrono::{DateTime, TimeZone, Utc};
use secrecy::SecretString;

use crate::{
    analyzer::release::{ChangeEntry, Tag},
    forge::{config::RemoteConfig, manager::ForgeManager, traits::MockForge},
};

/// Project path used by all fixtures.
pub const TEST_PROJECT: &str = "group/project";

/// Timestamp `secs` seconds after the epoch.
pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

/// Creates a test RemoteConfig with sensible defaults.
pub fn create_test_remote_config(dry_run: bool) -> RemoteConfig {
    RemoteConfig {
        host: "gitlab.com".to_string(),
        port: None,
        scheme: "https".to_string(),
        project: TEST_PROJECT.to_string(),
        token: SecretString::from("test-token".to_string()),
        dry_run,
    }
}

/// Creates a tag pointing at `sha`, committed `secs` after the epoch.
pub fn tag(name: &str, sha: &str, secs: i64) -> Tag {
    Tag {
        name: name.to_string(),
        sha: sha.to_string(),
        created_at: at(secs),
        release_notes: None,
    }
}

/// Creates a merged change entry by `dev` with merge commit `merge<iid>`.
pub fn change_entry(
    iid: u64,
    title: &str,
    target_branch: &str,
    merged_secs: i64,
) -> ChangeEntry {
    ChangeEntry {
        title: title.to_string(),
        author: "dev".to_string(),
        reference: iid,
        url: format!("https://gitlab.com/{TEST_PROJECT}/-/merge_requests/{iid}"),
        target_branch: target_branch.to_string(),
        merged_at: Some(at(merged_secs)),
        merge_commit_sha: Some(format!("merge{iid}")),
        labels: vec![],
        description: String::new(),
    }
}

/// Mock forge answering the calls every command makes: remote config,
/// default branch `main` and no `walle.toml`.
pub fn create_mock_forge(dry_run: bool) -> MockForge {
    let mut mock_forge = MockForge::new();
    mock_forge
        .expect_remote_config()
        .returning(move || create_test_remote_config(dry_run));
    mock_forge
        .expect_default_branch()
        .returning(|| "main".to_string());
    mock_forge
}

/// Wraps a mock forge in a manager.
pub fn create_test_manager(mock_forge: MockForge) -> ForgeManager {
    ForgeManager::new(Box::new(mock_forge))
}

/// Makes every `walle.toml` lookup on the mock report a missing file.
pub fn expect_no_config_file(mock_forge: &mut MockForge) {
    mock_forge
        .expect_get_file_content()
        .withf(|req| req.path == crate::config::CONFIG_FILE)
        .returning(|_| Ok(None));
}
