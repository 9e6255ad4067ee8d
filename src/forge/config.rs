//! Configuration for the GitLab connection.
use secrecy::SecretString;

/// Default GitLab instance.
pub const DEFAULT_HOST: &str = "https://gitlab.com";
/// Branch name prefix for changelog update merge requests.
pub const CHANGELOG_BRANCH_PREFIX: &str = "changelog-";
/// Maximum number of attempts for a request failing transiently.
pub const MAX_RETRY_ATTEMPTS: u32 = 8;
/// Delay before the first retry, doubled on every following attempt.
pub const INITIAL_RETRY_DELAY_SECS: u64 = 2;
/// Upper bound for the delay between two attempts.
pub const MAX_RETRY_DELAY_SECS: u64 = 120;

/// Remote project connection configuration for authenticating and
/// interacting with GitLab.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// GitLab host without scheme (e.g., "gitlab.com").
    pub host: String,
    /// Remote port for self-hosted instances.
    pub port: Option<u16>,
    /// URL scheme (http or https).
    pub scheme: String,
    /// Full project path (e.g., "group/subgroup/project").
    pub project: String,
    /// Access token for authentication.
    pub token: SecretString,
    /// When set no mutating request is sent.
    pub dry_run: bool,
}

impl RemoteConfig {
    /// Host and port the API client connects to.
    pub fn authority(&self) -> String {
        match self.port {
            Some(port) => format!("{}:{port}", self.host),
            None => self.host.clone(),
        }
    }

    /// Web URL of the project.
    pub fn project_url(&self) -> String {
        format!("{}://{}/{}", self.scheme, self.authority(), self.project)
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            host: "".to_string(),
            port: None,
            scheme: "https".to_string(),
            project: "".to_string(),
            token: SecretString::from("".to_string()),
            dry_run: false,
        }
    }
}
