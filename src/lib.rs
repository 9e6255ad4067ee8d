//! Release tooling for GitLab projects.
//!
//! Builds grouped release notes from the merge requests merged since the
//! previous tag, then publishes them as a tag, a release description or a
//! changelog update proposed through a merge request.
pub mod analyzer;
pub mod changelog;
pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod forge;

pub use error::{Result, WalleError};

#[cfg(test)]
pub mod test_helpers;
