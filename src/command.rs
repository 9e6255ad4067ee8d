//! Command execution for walle.
//!
//! - **release**: tag a ref and publish its release notes, optionally
//!   proposing a changelog update
//! - **changelog**: render release notes, optionally proposing them as a
//!   changelog update
//!
//! Both commands resolve the release range from the project tags, collect
//! entries from merged merge requests (or from merge commits) and go through
//! the [`ForgeManager`](crate::forge::manager::ForgeManager), which turns
//! every mutating call into a log line in dry-run mode.

/// Changelog rendering and update.
pub mod changelog;

/// Entry collection and changelog merge request workflow shared by the
/// commands.
pub mod common;

/// Tag creation and release publication.
pub mod release;
