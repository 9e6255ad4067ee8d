//! Data types for tags and the change entries that make up a release.
use chrono::{DateTime, Utc};
use std::fmt::Display;

/// Marker placed in front of a merge request number in rendered release
/// notes. Changelog consumers parse `[!<iid>](<url>)` so this is part of the
/// output format.
pub const REFERENCE_MARKER: &str = "!";

/// Git tag as reported by the forge, linking a name to the commit it points
/// at and, when one was published, its release description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tag {
    /// Tag name.
    pub name: String,
    /// Commit SHA the tag points at.
    pub sha: String,
    /// Creation time of the tagged commit.
    pub created_at: DateTime<Utc>,
    /// Release description attached to the tag, if any.
    pub release_notes: Option<String>,
}

impl Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// One merged unit of work considered for inclusion in a release note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeEntry {
    /// Merge request title, conventionally `type(scope): summary`.
    pub title: String,
    /// Username of the author.
    pub author: String,
    /// Merge request number within the project.
    pub reference: u64,
    /// Web link to the merge request.
    pub url: String,
    /// Branch the merge request was merged into.
    pub target_branch: String,
    /// When the merge request was merged.
    pub merged_at: Option<DateTime<Utc>>,
    /// SHA of the merge commit.
    pub merge_commit_sha: Option<String>,
    /// Labels attached to the merge request.
    pub labels: Vec<String>,
    /// Merge request description, checked for opt-out markers.
    pub description: String,
}

impl ChangeEntry {
    /// Renders the entry as a single release note line:
    /// `<title> ([!<iid>](<url>)) @<author>`.
    pub fn note_line(&self) -> String {
        format!(
            "{} ([{}{}]({})) @{}",
            self.title, REFERENCE_MARKER, self.reference, self.url, self.author
        )
    }
}
