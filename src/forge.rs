//! GitLab access for walle.
//!
//! The [`traits::Forge`] trait lists the calls release note synthesis and
//! publication need. [`gitlab::Gitlab`] implements it on top of the `gitlab`
//! crate and [`manager::ForgeManager`] wraps it to honor dry-run mode.

/// Configuration and authentication for the GitLab connection.
pub mod config;

/// GitLab API client implementation for GitLab.com and self-hosted instances.
pub mod gitlab;

/// Dry-run aware wrapper around the forge.
pub mod manager;

/// Request and response types shared by the forge and its callers.
pub mod request;

/// Common trait for the forge abstraction.
pub mod traits;
