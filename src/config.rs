//! Configuration loading and parsing for `walle.toml` files.
//!
//! The file is optional and read from the repository through the forge, at
//! the ref being released. Command line flags take precedence over it.
use serde::Deserialize;

use crate::Result;

/// Configuration filename looked up at the repository root.
pub const CONFIG_FILE: &str = "walle.toml";

/// Default changelog path.
pub const DEFAULT_CHANGELOG_FILE: &str = "CHANGELOG.md";

/// Changelog update settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)] // Use default for missing fields
pub struct ChangelogConfig {
    /// Path of the changelog file relative to the repository root.
    pub file: String,
    /// Branch the changelog merge request targets (default: project default
    /// branch).
    pub target_branch: Option<String>,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            file: DEFAULT_CHANGELOG_FILE.into(),
            target_branch: None,
        }
    }
}

/// Root configuration structure for `walle.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Target branches of the merge requests included in release notes.
    /// Empty means any branch.
    pub branches: Vec<String>,
    /// Changelog update settings.
    pub changelog: ChangelogConfig,
}

impl Config {
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_defaults() {
        let config = Config::default();
        assert!(config.branches.is_empty());
        assert_eq!(config.changelog.file, DEFAULT_CHANGELOG_FILE);
        assert!(config.changelog.target_branch.is_none());
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn parses_all_fields() {
        let config = Config::parse(
            r#"
branches = ["main"]

[changelog]
file = "docs/CHANGELOG.md"
target_branch = "develop"
"#,
        )
        .unwrap();

        assert_eq!(config.branches, vec!["main"]);
        assert_eq!(config.changelog.file, "docs/CHANGELOG.md");
        assert_eq!(config.changelog.target_branch.as_deref(), Some("develop"));
    }

    #[test]
    fn partial_changelog_section_keeps_defaults() {
        let config =
            Config::parse("[changelog]\ntarget_branch = \"main\"\n").unwrap();

        assert_eq!(config.changelog.file, DEFAULT_CHANGELOG_FILE);
    }

    #[test]
    fn rejects_invalid_toml() {
        assert!(Config::parse("branches = main").is_err());
    }
}
