//! CLI argument parsing and GitLab connection configuration.
use clap::{Parser, Subcommand, ValueEnum};
use secrecy::SecretString;
use url::Url;

use crate::{
    Result,
    error::WalleError,
    forge::config::{DEFAULT_HOST, RemoteConfig},
};

/// Global CLI arguments for the GitLab connection and debugging.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(short, long, env = "WALLE_PROJECT", default_value = "", global = true)]
    /// GitLab project path (e.g. group/subgroup/project).
    pub project: String,

    #[arg(
        long,
        env = "WALLE_GITLAB_TOKEN",
        default_value = "",
        hide_env_values = true,
        global = true
    )]
    /// GitLab access token with api scope.
    pub token: String,

    #[arg(long, env = "WALLE_GITLAB_HOST", default_value = DEFAULT_HOST, global = true)]
    /// GitLab instance URL. Self-hosted instances are supported.
    pub host: String,

    #[arg(long, default_value_t = false, global = true)]
    /// Enable debug logging.
    pub debug: bool,

    #[arg(long, default_value_t = false, global = true)]
    /// Log the changes that would be made without making them.
    pub dry: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Where release note entries are collected from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum NoteSource {
    /// Merged merge requests updated since the previous tag.
    #[default]
    MergeRequests,
    /// Merge commits on the released ref since the previous tag.
    Commits,
}

/// Arguments of the `release` subcommand.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ReleaseArgs {
    #[arg(short, long)]
    /// Name of the tag to release.
    pub tag: String,

    #[arg(long = "ref")]
    /// Commit SHA, branch or tag the new tag points at.
    pub ref_name: String,

    #[arg(short = 'b', long = "branch")]
    /// Only include merge requests targeting this branch. Repeatable.
    pub branches: Vec<String>,

    #[arg(short, long)]
    /// Annotation message of the tag.
    pub message: Option<String>,

    #[arg(long, value_enum, default_value_t = NoteSource::MergeRequests)]
    /// Where release note entries are collected from.
    pub source: NoteSource,

    #[arg(long, default_value_t = false)]
    /// Also open a merge request adding the notes to the changelog.
    pub changelog: bool,

    #[arg(long)]
    /// Target branch of the changelog merge request (default: project
    /// default branch).
    pub changelog_branch: Option<String>,

    #[arg(short, long)]
    /// Changelog file path (default: CHANGELOG.md or the one set in
    /// walle.toml).
    pub file: Option<String>,

    #[arg(long, default_value_t = false)]
    /// Merge the changelog merge request right away.
    pub merge: bool,
}

/// Arguments of the `changelog` subcommand.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ChangelogArgs {
    #[arg(short = 'b', long = "branch")]
    /// Only include merge requests targeting this branch. Repeatable.
    pub branches: Vec<String>,

    #[arg(short, long)]
    /// Tag to write the changelog of. Without it the changes since the
    /// newest tag are shown.
    pub tag: Option<String>,

    #[arg(long = "ref")]
    /// Ref the changelog is read from and commits are listed on (default:
    /// project default branch).
    pub ref_name: Option<String>,

    #[arg(long, value_enum, default_value_t = NoteSource::MergeRequests)]
    /// Where release note entries are collected from.
    pub source: NoteSource,

    #[arg(long, default_value_t = false)]
    /// Open a merge request updating the changelog file.
    pub update: bool,

    #[arg(long)]
    /// Target branch of the changelog merge request (default: project
    /// default branch).
    pub target_branch: Option<String>,

    #[arg(short, long)]
    /// Changelog file path (default: CHANGELOG.md or the one set in
    /// walle.toml).
    pub file: Option<String>,

    #[arg(long, default_value_t = false)]
    /// Merge the changelog merge request right away.
    pub merge: bool,
}

/// Release operation subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Tag a new release with notes built from merged merge requests.
    Release(ReleaseArgs),

    /// Show release notes or propose them as a changelog update.
    Changelog(ChangelogArgs),
}

impl Args {
    /// Configure the GitLab connection from CLI arguments.
    pub fn get_remote(&self) -> Result<RemoteConfig> {
        let project = self.project.trim_matches('/').to_string();

        if project.is_empty() {
            return Err(WalleError::invalid_args(
                "must set a project with --project or WALLE_PROJECT",
            ));
        }

        if self.token.is_empty() {
            return Err(WalleError::invalid_args(
                "must set a token with --token or WALLE_GITLAB_TOKEN",
            ));
        }

        let host = if self.host.contains("://") {
            self.host.clone()
        } else {
            format!("https://{}", self.host)
        };

        let parsed = Url::parse(&host)?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(WalleError::invalid_args(
                "only http and https schemes are supported for hosts",
            ));
        }

        let host_name = parsed.host_str().ok_or_else(|| {
            WalleError::invalid_args(format!(
                "unable to parse host from {}",
                self.host
            ))
        })?;

        Ok(RemoteConfig {
            host: host_name.to_string(),
            port: parsed.port(),
            scheme: parsed.scheme().to_string(),
            project,
            token: SecretString::from(self.token.clone()),
            dry_run: self.dry,
        })
    }
}
