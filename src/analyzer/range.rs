//! Resolution of the "since the previous release" range from a tag list.
use chrono::{DateTime, Utc};
use log::*;

use crate::analyzer::release::{ChangeEntry, Tag};

/// Lower and upper boundary of a release, by commit and by timestamp.
///
/// The lower bound defaults to the epoch with no commit, which covers the
/// whole history. A missing upper bound means the range is open up to now.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeBounds {
    /// Commit time of the previous release tag.
    pub since: DateTime<Utc>,
    /// Commit of the previous release tag.
    pub since_sha: Option<String>,
    /// Commit time of the target tag when it already exists.
    pub until: Option<DateTime<Utc>>,
    /// Commit of the target tag when it already exists.
    pub until_sha: Option<String>,
}

impl RangeBounds {
    /// Range covering the whole history up to now.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Lower bound timestamp, or `None` when the range starts at the
    /// beginning of history.
    pub fn lower_bound(&self) -> Option<DateTime<Utc>> {
        self.since_sha.as_ref().map(|_| self.since)
    }

    /// Whether a merged entry belongs to this range.
    ///
    /// The previous tag's own merge commit is excluded. When the target tag
    /// already exists its own merge commit is included, along with anything
    /// merged strictly before it.
    pub fn contains(&self, entry: &ChangeEntry) -> bool {
        let merge_sha = entry.merge_commit_sha.as_deref().unwrap_or_default();

        if let Some(since_sha) = self.since_sha.as_deref()
            && !since_sha.is_empty()
            && merge_sha == since_sha
        {
            return false;
        }

        let until_sha = self.until_sha.as_deref().unwrap_or_default();

        if until_sha.is_empty() || merge_sha == until_sha {
            return true;
        }

        match self.until {
            Some(until) => entry.merged_at.is_some_and(|m| m < until),
            None => true,
        }
    }
}

/// Outcome of resolving the range for a target tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedRange {
    /// Whether the target tag already exists on the forge.
    pub exists: bool,
    pub bounds: RangeBounds,
}

/// Resolves release bounds for `target` from `tags`, which must be ordered
/// newest first.
///
/// When the target exists it becomes the upper bound and the next older tag
/// the lower bound. Otherwise the newest tag is the lower bound and the range
/// is open ended.
pub fn resolve(tags: &[Tag], target: &str) -> ResolvedRange {
    let Some(position) = tags.iter().position(|t| t.name == target) else {
        let bounds = match tags.first() {
            Some(newest) => {
                debug!("{target} not found: starting after {newest}");
                RangeBounds {
                    since: newest.created_at,
                    since_sha: Some(newest.sha.clone()),
                    ..RangeBounds::default()
                }
            }
            None => {
                debug!("no tags found: {target} covers the whole history");
                RangeBounds::unbounded()
            }
        };

        return ResolvedRange {
            exists: false,
            bounds,
        };
    };

    let current = &tags[position];
    let previous = tags.get(position + 1);

    debug!(
        "{target} already exists at {}: previous tag is {:?}",
        current.sha,
        previous.map(|t| t.name.as_str())
    );

    ResolvedRange {
        exists: true,
        bounds: RangeBounds {
            since: previous.map(|t| t.created_at).unwrap_or_default(),
            since_sha: previous.map(|t| t.sha.clone()),
            until: Some(current.created_at),
            until_sha: Some(current.sha.clone()),
        },
    }
}
