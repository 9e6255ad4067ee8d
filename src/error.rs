//! Custom error types for walle with improved type safety and error handling.

use thiserror::Error;

use crate::forge::gitlab::endpoints::{
    ProjectTagBuilderError, RepositoryCommitsBuilderError,
    UpdateReleaseBuilderError, UpdateRepositoryFileBuilderError,
};

/// Main error type for walle operations.
#[derive(Error, Debug)]
pub enum WalleError {
    // Cli args errors
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    // Forge errors
    #[error("Forge operation failed: {0}")]
    ForgeError(String),

    #[error("API authentication failed: {0}")]
    AuthenticationError(String),

    #[error("Endpoint builder error: {0}")]
    BuilderError(String),

    // Parsing errors - automatic conversions via #[from]
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("Datetime parse error: {0}")]
    ChronoParseError(#[from] chrono::ParseError),

    #[error("Base64 decode error: {0}")]
    Base64DecodeError(#[from] base64::DecodeError),

    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] log::SetLoggerError),
}

/// Result type alias using WalleError
pub type Result<T> = std::result::Result<T, WalleError>;

impl WalleError {
    /// Create a forge error with context
    pub fn forge(msg: impl Into<String>) -> Self {
        Self::ForgeError(msg.into())
    }

    /// Create an invalid arguments error
    pub fn invalid_args(msg: impl Into<String>) -> Self {
        Self::InvalidArgs(msg.into())
    }
}

impl From<gitlab::api::ApiError<gitlab::RestError>> for WalleError {
    fn from(err: gitlab::api::ApiError<gitlab::RestError>) -> Self {
        match &err {
            gitlab::api::ApiError::GitlabWithStatus { status, msg }
                if status.as_u16() == 401 || status.as_u16() == 403 =>
            {
                Self::AuthenticationError(msg.clone())
            }
            _ => Self::ForgeError(format!("GitLab API error: {}", err)),
        }
    }
}

impl From<gitlab::GitlabError> for WalleError {
    fn from(err: gitlab::GitlabError) -> Self {
        Self::ForgeError(format!("GitLab error: {}", err))
    }
}

// Endpoint builders generated by derive_builder each carry their own error
// type, both for the gitlab crate endpoints and for the ones defined here.
macro_rules! impl_from_builder_error {
    ($($err:ty),* $(,)?) => {
        $(
            impl From<$err> for WalleError {
                fn from(err: $err) -> Self {
                    Self::BuilderError(err.to_string())
                }
            }
        )*
    };
}

impl_from_builder_error!(
    gitlab::api::projects::ProjectBuilderError,
    gitlab::api::projects::merge_requests::MergeRequestBuilderError,
    gitlab::api::projects::merge_requests::MergeRequestsBuilderError,
    gitlab::api::projects::merge_requests::CreateMergeRequestBuilderError,
    gitlab::api::projects::merge_requests::MergeMergeRequestBuilderError,
    gitlab::api::projects::releases::CreateReleaseBuilderError,
    gitlab::api::projects::repository::branches::CreateBranchBuilderError,
    gitlab::api::projects::repository::files::CreateFileBuilderError,
    gitlab::api::projects::repository::files::FileBuilderError,
    gitlab::api::projects::repository::tags::TagsBuilderError,
    gitlab::api::projects::repository::tags::CreateTagBuilderError,
    ProjectTagBuilderError,
    RepositoryCommitsBuilderError,
    UpdateReleaseBuilderError,
    UpdateRepositoryFileBuilderError,
);
